use chrono::{Local, NaiveDate};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date in the store's local timezone (purchase dates are local).
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
