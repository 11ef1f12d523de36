//! HTTP date header value management service.
//!
//! This module provides a service for efficiently managing and updating HTTP
//! date header values in a concurrent environment. It updates the date string
//! periodically to avoid repeated date string formatting operations in
//! high-concurrency scenarios.

use arc_swap::ArcSwap;
use bytes::Bytes;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;

/// A service that maintains and periodically updates the current HTTP date
/// string.
///
/// The service runs a background task that refreshes the formatted date
/// every 800ms, so every header block gets a current `Date` value without
/// formatting one per response.
pub struct DateService {
    current: Arc<ArcSwap<Bytes>>,
    handle: tokio::task::JoinHandle<()>,
}

static DATE_SERVICE: Lazy<DateService> = Lazy::new(|| DateService::with_update_interval(Duration::from_millis(800)));

impl DateService {
    /// Returns a reference to the global singleton instance of `DateService`.
    ///
    /// The first call must happen inside a tokio runtime, because it spawns
    /// the background refresh task.
    pub fn global() -> &'static DateService {
        &DATE_SERVICE
    }

    fn with_update_interval(update_interval: Duration) -> Self {
        let current = Arc::new(ArcSwap::from_pointee(Self::format_now()));
        let current_arc = Arc::clone(&current);

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(update_interval).await;
                current_arc.store(Arc::new(Self::format_now()));
            }
        });

        DateService { current, handle }
    }

    fn format_now() -> Bytes {
        let mut buf = faf_http_date::get_date_buff_no_key();
        faf_http_date::get_date_no_key(&mut buf);
        Bytes::from_owner(buf)
    }

    /// Provides access to the current HTTP date string through a callback
    /// function, without exposing the internal synchronization mechanisms.
    pub fn with_date<F>(&self, f: F)
    where
        F: FnOnce(&[u8]),
    {
        let snapshot = self.current.load();
        let date: &Bytes = &snapshot;
        f(date.as_ref());
    }
}

impl std::fmt::Debug for DateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateService").finish_non_exhaustive()
    }
}

/// Ensures the background task is properly cleaned up when the `DateService`
/// is dropped.
impl Drop for DateService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_date_value_looks_like_imf_fixdate() {
        let mut value = Vec::new();
        DateService::global().with_date(|date| value.extend_from_slice(date));

        let text = std::str::from_utf8(&value).unwrap();
        // e.g. "Sun, 06 Nov 1994 08:49:37 GMT"
        assert!(text.ends_with("GMT"), "unexpected date format: {text}");
        assert_eq!(text.as_bytes()[3], b',');
    }
}
