use chrono::Utc;
use derive_more::Constructor;
use dev_aura::api::{Error, Result};
use log::debug;
use log::info;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Constructor, Debug)]
pub struct RateLimit {
    limit: u32,
    remaining: u32,
    reset: i64,
}

impl RateLimit {
    /// Limit of a client which has not seen any API response yet.
    pub fn unknown() -> Self {
        RateLimit::new(u32::MAX, u32::MAX, 0)
    }
}

/// Quota bookkeeping shared by all requests of a client.
///
/// Never waits for the quota to renew, a request which would exceed it is refused.
#[derive(Constructor)]
pub struct RateLimiter {
    limit: Arc<Mutex<RateLimit>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        RateLimiter::new(Arc::new(Mutex::new(RateLimit::unknown())))
    }
}

impl RateLimiter {
    /// Reserves one request from the quota.
    pub(crate) async fn acquire(&self) -> Result<()> {
        let mut rate_limit = self.limit.lock().await;
        if rate_limit.remaining > 0 {
            debug!("Remaining limit {}.", rate_limit.remaining);
            rate_limit.remaining -= 1;
            return Ok(());
        }
        let now = Utc::now().timestamp();
        if rate_limit.reset < now {
            debug!("Old reset. Resetting remaining to limit.");
            rate_limit.remaining = rate_limit.limit.saturating_sub(1);
            return Ok(());
        }
        info!("API rate limit reached, quota renews in {} sec", rate_limit.reset - now);
        Err(Error::RateLimited)
    }

    /// Updates the quota from `x-ratelimit-*` response headers, if present.
    pub(crate) async fn update(&self, headers: &HeaderMap<HeaderValue>) {
        let (limit, remaining, reset) = match (
            read_header::<u32>(headers, "x-ratelimit-limit"),
            read_header::<u32>(headers, "x-ratelimit-remaining"),
            read_header::<i64>(headers, "x-ratelimit-reset"),
        ) {
            (Some(limit), Some(remaining), Some(reset)) => (limit, remaining, reset),
            _ => return,
        };
        let mut rate_limit = self.limit.lock().await;
        rate_limit.limit = limit;
        match reset.cmp(&rate_limit.reset) {
            // Response from a renewed window, quota of the old one no longer applies
            Ordering::Greater => {
                rate_limit.remaining = remaining;
                rate_limit.reset = reset;
            }
            // Min `remaining` because in case of parallel requests late response may arrive with old `remaining`
            Ordering::Equal => rate_limit.remaining = std::cmp::min(remaining, rate_limit.remaining),
            // Late response from a window which has already been replaced
            Ordering::Less => return,
        }
        debug!("Updated limits: {:?}", rate_limit);
    }
}

fn read_header<T: FromStr>(headers: &HeaderMap<HeaderValue>, header: &str) -> Option<T> {
    headers.get(header)?.to_str().ok()?.parse::<T>().ok()
}

#[cfg(test)]
fn headers(limit: u32, remaining: u32, reset: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(reset));
    headers
}

#[cfg(test)]
#[tokio::test]
async fn acquire_test() {
    let reset = Utc::now().timestamp() + 3600;
    let limiter = RateLimiter::new(Arc::new(Mutex::new(RateLimit::new(60, 1, reset))));
    assert!(limiter.acquire().await.is_ok(), "Limiter should let through with remaining set to 1");
    assert!(
        matches!(limiter.acquire().await, Err(Error::RateLimited)),
        "Limiter should refuse once quota is used up before reset"
    );

    let limiter = RateLimiter::new(Arc::new(Mutex::new(RateLimit::new(60, 0, Utc::now().timestamp() - 1))));
    assert!(limiter.acquire().await.is_ok(), "Remaining should be reset after reset time passed");
    assert!(limiter.acquire().await.is_ok());
}

#[cfg(test)]
#[tokio::test]
async fn update_test() {
    let limiter = RateLimiter::default();
    assert!(limiter.acquire().await.is_ok(), "Unknown limit should not block");

    let reset = Utc::now().timestamp() + 3600;
    limiter.update(&headers(60, 0, reset)).await;
    assert!(matches!(limiter.acquire().await, Err(Error::RateLimited)));

    // late response carrying older quota
    limiter.update(&headers(60, 5, reset - 60)).await;
    assert!(
        matches!(limiter.acquire().await, Err(Error::RateLimited)),
        "Stale headers should not restore remaining quota"
    );

    limiter.update(&HeaderMap::new()).await;
    assert!(matches!(limiter.acquire().await, Err(Error::RateLimited)));
}

#[cfg(test)]
#[tokio::test]
async fn renewed_window_test() {
    let now = Utc::now().timestamp();
    let limiter = RateLimiter::new(Arc::new(Mutex::new(RateLimit::new(60, 1, now - 10))));
    assert!(limiter.acquire().await.is_ok());

    limiter.update(&headers(60, 59, now + 3600)).await;
    assert!(
        limiter.acquire().await.is_ok(),
        "Remaining of a renewed window should replace the one left from the old window"
    );

    limiter.update(&headers(60, 0, now + 3600)).await;
    assert!(
        matches!(limiter.acquire().await, Err(Error::RateLimited)),
        "Within the same window the lower remaining wins"
    );
}
