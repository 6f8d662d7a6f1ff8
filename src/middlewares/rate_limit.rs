//! 认证端点限流
//!
//! 登录与刷新令牌按客户端 IP 在固定窗口内计数，超出后返回 429 并带 `Retry-After`。
//! 两类端点的计数互不影响。

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use super::create_error_response;
use crate::models::ErrorCode;

const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// 受限流保护的端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottledEndpoint {
    Login,
    Refresh,
}

impl ThrottledEndpoint {
    /// 每个窗口允许的请求数
    pub fn quota(self) -> u32 {
        match self {
            ThrottledEndpoint::Login => 5,
            ThrottledEndpoint::Refresh => 10,
        }
    }

    pub fn window(self) -> Duration {
        Duration::from_secs(60)
    }

    fn label(self) -> &'static str {
        match self {
            ThrottledEndpoint::Login => "login",
            ThrottledEndpoint::Refresh => "refresh",
        }
    }

    fn windows(self) -> &'static Cache<IpAddr, Window> {
        match self {
            ThrottledEndpoint::Login => &LOGIN_WINDOWS,
            ThrottledEndpoint::Refresh => &REFRESH_WINDOWS,
        }
    }
}

fn window_cache(endpoint: ThrottledEndpoint) -> Cache<IpAddr, Window> {
    Cache::builder()
        .time_to_live(endpoint.window())
        .max_capacity(50_000)
        .build()
}

static LOGIN_WINDOWS: Lazy<Cache<IpAddr, Window>> =
    Lazy::new(|| window_cache(ThrottledEndpoint::Login));
static REFRESH_WINDOWS: Lazy<Cache<IpAddr, Window>> =
    Lazy::new(|| window_cache(ThrottledEndpoint::Refresh));

/// 单个客户端的计数窗口
#[derive(Debug, Clone, Copy)]
struct Window {
    opened_at: Instant,
    hits: u32,
}

/// 一次计数的结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Allowed { remaining: u32 },
    Rejected { retry_after: u64 },
}

impl Window {
    fn open(now: Instant) -> Self {
        Self {
            opened_at: now,
            hits: 0,
        }
    }

    /// 记录一次请求；窗口过期则重新开窗
    fn hit(self, now: Instant, quota: u32, length: Duration) -> (Window, Verdict) {
        let elapsed = now.saturating_duration_since(self.opened_at);
        let current = if elapsed >= length {
            Window::open(now)
        } else {
            self
        };

        if current.hits >= quota {
            let left = length.saturating_sub(now.saturating_duration_since(current.opened_at));
            // 向上取整，至少 1 秒
            let retry_after = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            return (
                current,
                Verdict::Rejected {
                    retry_after: retry_after.max(1),
                },
            );
        }

        let next = Window {
            hits: current.hits + 1,
            ..current
        };
        (
            next,
            Verdict::Allowed {
                remaining: quota - next.hits,
            },
        )
    }
}

/// 客户端 IP：优先连接信息，其次代理头；无法识别时返回 None
fn client_ip(req: &ServiceRequest) -> Option<IpAddr> {
    let parse = |raw: &str| raw.trim().parse::<IpAddr>().ok();

    if let Some(ip) = req.connection_info().realip_remote_addr().and_then(parse) {
        return Some(ip);
    }
    if let Some(ip) = req.peer_addr().map(|addr| addr.ip()) {
        return Some(ip);
    }
    req.headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(parse)
}

/// 认证端点限流中间件
#[derive(Clone)]
pub struct RateLimit {
    endpoint: ThrottledEndpoint,
}

impl RateLimit {
    pub fn for_endpoint(endpoint: ThrottledEndpoint) -> Self {
        Self { endpoint }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::for_endpoint(ThrottledEndpoint::Login)
    }

    /// 刷新令牌：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::for_endpoint(ThrottledEndpoint::Refresh)
    }
}

/// 计入一次请求并返回结论
async fn record_hit(endpoint: ThrottledEndpoint, ip: IpAddr) -> Verdict {
    let now = Instant::now();
    let mut verdict = Verdict::Allowed {
        remaining: endpoint.quota(),
    };
    let verdict_slot = &mut verdict;

    endpoint
        .windows()
        .entry(ip)
        .and_upsert_with(|existing| {
            let window = existing.map_or_else(|| Window::open(now), |e| e.into_value());
            let (next, outcome) = window.hit(now, endpoint.quota(), endpoint.window());
            *verdict_slot = outcome;
            std::future::ready(next)
        })
        .await;

    verdict
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            endpoint: self.endpoint,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    endpoint: ThrottledEndpoint,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let endpoint = self.endpoint;

        Box::pin(async move {
            // 无法识别来源时不计数
            let Some(ip) = client_ip(&req) else {
                return Ok(srv.call(req).await?.map_into_left_body());
            };

            match record_hit(endpoint, ip).await {
                Verdict::Allowed { remaining } => {
                    let mut res = srv.call(req).await?;
                    res.headers_mut()
                        .insert(RATE_LIMIT_REMAINING, HeaderValue::from(remaining));
                    Ok(res.map_into_left_body())
                }
                Verdict::Rejected { retry_after } => {
                    warn!(
                        "{} 请求过于频繁: {ip}，{retry_after} 秒后可重试",
                        endpoint.label()
                    );
                    let mut response = create_error_response(
                        StatusCode::TOO_MANY_REQUESTS,
                        ErrorCode::RateLimitExceeded,
                        "Too many requests, please try again later",
                    );
                    response
                        .headers_mut()
                        .insert(RETRY_AFTER, HeaderValue::from(retry_after));
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_endpoint_quotas() {
        assert_eq!(ThrottledEndpoint::Login.quota(), 5);
        assert_eq!(ThrottledEndpoint::Refresh.quota(), 10);
        assert_eq!(RateLimit::login().endpoint, ThrottledEndpoint::Login);
        assert_eq!(RateLimit::refresh_token().endpoint, ThrottledEndpoint::Refresh);
    }

    #[test]
    fn test_window_rejects_after_quota() {
        let start = Instant::now();
        let mut window = Window::open(start);
        for expected_remaining in (0..3).rev() {
            let (next, verdict) = window.hit(start, 3, MINUTE);
            assert_eq!(
                verdict,
                Verdict::Allowed {
                    remaining: expected_remaining
                }
            );
            window = next;
        }

        let (_, verdict) = window.hit(start + Duration::from_millis(20_500), 3, MINUTE);
        assert_eq!(verdict, Verdict::Rejected { retry_after: 40 });
    }

    #[test]
    fn test_window_reopens_after_expiry() {
        let start = Instant::now();
        let (full, _) = Window {
            opened_at: start,
            hits: 4,
        }
        .hit(start, 5, MINUTE);
        assert_eq!(full.hits, 5);

        let (reopened, verdict) = full.hit(start + MINUTE, 5, MINUTE);
        assert_eq!(verdict, Verdict::Allowed { remaining: 4 });
        assert_eq!(reopened.hits, 1);
    }

    #[tokio::test]
    async fn test_endpoints_counted_separately() {
        let ip: IpAddr = "203.0.113.7".parse().unwrap();
        for _ in 0..5 {
            assert!(matches!(
                record_hit(ThrottledEndpoint::Login, ip).await,
                Verdict::Allowed { .. }
            ));
        }
        assert!(matches!(
            record_hit(ThrottledEndpoint::Login, ip).await,
            Verdict::Rejected { .. }
        ));
        assert_eq!(
            record_hit(ThrottledEndpoint::Refresh, ip).await,
            Verdict::Allowed { remaining: 9 }
        );
    }

    #[test]
    fn test_client_ip_sources() {
        let direct = TestRequest::default()
            .peer_addr("198.51.100.4:5000".parse().unwrap())
            .to_srv_request();
        assert_eq!(client_ip(&direct), "198.51.100.4".parse().ok());

        let proxied = TestRequest::default()
            .insert_header(("X-Forwarded-For", "192.0.2.9, 10.0.0.1"))
            .to_srv_request();
        assert_eq!(client_ip(&proxied), "192.0.2.9".parse().ok());

        let garbage = TestRequest::default()
            .insert_header(("X-Forwarded-For", "not-an-ip"))
            .to_srv_request();
        assert_eq!(client_ip(&garbage), None);
    }
}
