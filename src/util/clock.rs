//! Wall-clock access that works in the browser and in native tests.

/// Current Unix time in seconds.
#[must_use]
pub fn now_secs() -> i64 {
    now_millis() / 1000
}

/// Current Unix time in milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let millis = js_sys::Date::now() as i64;
        millis
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}
