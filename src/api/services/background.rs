//! 背景图端点

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderMap};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{error, trace};

use crate::services::{BackgroundGenerator, ClientFingerprint};

use super::error_code::ErrorCode;
use super::helpers::{error_response, success_response};
use super::types::BackgroundQuery;

/// 随机种子的上界（不含）
const RANDOM_SEED_BOUND: u32 = 1_000_000;

/// 种子来源，决定缓存策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOrigin {
    Explicit,
    Random,
    Fingerprint,
}

impl SeedOrigin {
    fn cache_control(&self) -> &'static str {
        match self {
            SeedOrigin::Explicit => "public, max-age=86400",
            SeedOrigin::Random => "no-store",
            SeedOrigin::Fingerprint => "private, max-age=3600",
        }
    }
}

/// 显式 seed 优先，其次 random，最后由客户端特征派生
pub fn resolve_seed(query: &BackgroundQuery, headers: &HeaderMap) -> (u32, SeedOrigin) {
    if let Some(seed) = query.seed {
        return (seed, SeedOrigin::Explicit);
    }
    if query.random {
        return (rand::random_range(0..RANDOM_SEED_BOUND), SeedOrigin::Random);
    }
    (fingerprint_from_request(query, headers).seed(), SeedOrigin::Fingerprint)
}

/// 由请求头与查询参数构造客户端特征
pub fn fingerprint_from_request(query: &BackgroundQuery, headers: &HeaderMap) -> ClientFingerprint {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    let language = query.lang.clone().unwrap_or_else(|| {
        // Accept-Language 的第一个语言标签
        header_str(header::ACCEPT_LANGUAGE)
            .split(',')
            .next()
            .and_then(|tag| tag.split(';').next())
            .map(|tag| tag.trim().to_string())
            .unwrap_or_default()
    });

    ClientFingerprint {
        user_agent: header_str(header::USER_AGENT),
        screen_width: query.sw.unwrap_or(0),
        screen_height: query.sh.unwrap_or(0),
        time_zone: query.tz.clone().unwrap_or_default(),
        language,
    }
}

fn etag_matches(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|tag| {
            let tag = tag.trim();
            tag == "*" || tag == etag || tag.strip_prefix("W/") == Some(etag)
        }))
}

pub struct BackgroundApi;

impl BackgroundApi {
    /// `GET /background.svg`
    pub async fn svg(
        req: HttpRequest,
        generator: web::Data<Arc<BackgroundGenerator>>,
        query: web::Query<BackgroundQuery>,
    ) -> HttpResponse {
        let query = query.into_inner();
        let (seed, origin) = resolve_seed(&query, req.headers());
        let (width, height) = generator.resolve_size(query.width, query.height);

        let info = generator.describe(seed, width, height);
        let etag = info.etag();
        if origin != SeedOrigin::Random && etag_matches(&req, &etag) {
            trace!("Background {} not modified", etag);
            return HttpResponse::NotModified()
                .insert_header((header::ETAG, etag))
                .finish();
        }

        let generator = generator.get_ref().clone();
        let rendered = web::block(move || generator.render_svg(seed, width, height)).await;
        let svg = match rendered {
            Ok((_, svg)) => svg,
            Err(e) => {
                error!("Background rendering failed: {}", e);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    "Failed to render background",
                );
            }
        };

        HttpResponse::Ok()
            .content_type("image/svg+xml")
            .insert_header((header::ETAG, etag))
            .insert_header((header::CACHE_CONTROL, origin.cache_control()))
            .insert_header(("X-Background-Seed", seed.to_string()))
            .insert_header(("X-Background-Pattern", info.pattern.name().to_string()))
            .body(svg)
    }

    /// `GET /background`：只返回描述信息
    pub async fn info(
        req: HttpRequest,
        generator: web::Data<Arc<BackgroundGenerator>>,
        query: web::Query<BackgroundQuery>,
    ) -> HttpResponse {
        let query = query.into_inner();
        let (seed, _) = resolve_seed(&query, req.headers());
        let (width, height) = generator.resolve_size(query.width, query.height);
        success_response(generator.describe(seed, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    fn headers() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::USER_AGENT, HeaderValue::from_static("TestAgent/1.0"));
        h.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("de-DE,de;q=0.9,en;q=0.8"),
        );
        h
    }

    #[test]
    fn test_explicit_seed_wins() {
        let query = BackgroundQuery {
            seed: Some(7),
            random: true,
            ..Default::default()
        };
        assert_eq!(resolve_seed(&query, &headers()), (7, SeedOrigin::Explicit));
    }

    #[test]
    fn test_random_seed_in_range() {
        let query = BackgroundQuery {
            random: true,
            ..Default::default()
        };
        for _ in 0..50 {
            let (seed, origin) = resolve_seed(&query, &headers());
            assert!(seed < RANDOM_SEED_BOUND);
            assert_eq!(origin, SeedOrigin::Random);
        }
    }

    #[test]
    fn test_fingerprint_from_headers() {
        let query = BackgroundQuery {
            tz: Some("Europe/Berlin".to_string()),
            sw: Some(2560),
            sh: Some(1440),
            ..Default::default()
        };
        let fp = fingerprint_from_request(&query, &headers());
        assert_eq!(fp.user_agent, "TestAgent/1.0");
        assert_eq!(fp.language, "de-DE");
        assert_eq!(fp.canonical(), "TestAgent/1.02560x1440Europe/Berlinde-DE");

        let (seed, origin) = resolve_seed(&query, &headers());
        assert_eq!(origin, SeedOrigin::Fingerprint);
        assert_eq!(seed, fp.seed());
    }

    #[test]
    fn test_lang_query_overrides_header() {
        let query = BackgroundQuery {
            lang: Some("fr".to_string()),
            ..Default::default()
        };
        assert_eq!(fingerprint_from_request(&query, &headers()).language, "fr");
        assert_eq!(
            fingerprint_from_request(&query, &HeaderMap::new()).user_agent,
            ""
        );
    }
}
