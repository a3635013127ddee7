use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use rust_embed::Embed;
use tracing::{debug, trace};

use crate::config::get_config;

use super::error_code::ErrorCode;
use super::helpers::error_response;

// 使用 RustEmbed 自动嵌入静态文件
#[derive(Embed)]
#[folder = "web/dist/"]
struct FrontendAssets;

pub struct FrontendService;

impl FrontendService {
    /// 渲染 index.html，替换版本号与 API 前缀占位符
    pub fn render_index(api_prefix: &str) -> Option<String> {
        let content = FrontendAssets::get("index.html")?;
        let html = String::from_utf8_lossy(&content.data);
        Some(
            html.replace("%FOLIO_VERSION%", env!("CARGO_PKG_VERSION"))
                .replace("%API_PREFIX%", api_prefix),
        )
    }

    fn index_response() -> HttpResponse {
        let config = get_config();
        match Self::render_index(&config.server.api_prefix) {
            Some(html) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html),
            None => HttpResponse::NotFound().body("Frontend bundle not found"),
        }
    }

    /// 处理前端首页
    pub async fn handle_index() -> Result<HttpResponse> {
        trace!("Serving frontend index page");
        Ok(Self::index_response())
    }

    /// 处理静态资源文件
    pub async fn handle_static(req: HttpRequest) -> Result<HttpResponse> {
        let path = req.match_info().query("path");
        trace!("Serving static file: {}", path);

        let asset_path = format!("assets/{}", path);

        match FrontendAssets::get(&asset_path) {
            Some(content) => Ok(HttpResponse::Ok()
                .content_type(Self::get_content_type(path))
                .insert_header(("Cache-Control", "public, max-age=31536000, immutable"))
                .body(content.data.into_owned())),
            None => {
                debug!("Static file not found: {}", path);
                Ok(HttpResponse::NotFound().body("File not found"))
            }
        }
    }

    /// 处理 favicon.ico 请求
    pub async fn handle_favicon() -> Result<HttpResponse> {
        trace!("Serving favicon");

        match FrontendAssets::get("favicon.ico") {
            Some(favicon_data) => Ok(HttpResponse::Ok()
                .content_type("image/x-icon")
                .body(favicon_data.data.into_owned())),
            // 没有图标时返回空响应
            None => Ok(HttpResponse::Ok().content_type("image/x-icon").body(vec![])),
        }
    }

    /// 未匹配的路由
    ///
    /// API 与健康检查前缀下返回 JSON 404，其余 GET/HEAD 返回 index.html（SPA 路由）
    pub async fn handle_spa_fallback(req: HttpRequest) -> Result<HttpResponse> {
        let config = get_config();
        let path = req.path();

        let under = |prefix: &str| {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        };

        if under(&config.server.api_prefix) || under(&config.server.health_prefix) {
            debug!("No API route for {} {}", req.method(), path);
            return Ok(error_response(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                &format!("No route for {} {}", req.method(), path),
            ));
        }

        if req.method() != actix_web::http::Method::GET
            && req.method() != actix_web::http::Method::HEAD
        {
            return Ok(HttpResponse::MethodNotAllowed().finish());
        }

        trace!("SPA fallback - serving index.html for {}", path);
        Ok(Self::index_response())
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        match path.rsplit('.').next() {
            Some("css") => "text/css",
            Some("js") | Some("mjs") => "application/javascript",
            Some("json") => "application/json",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("webp") => "image/webp",
            Some("woff") => "font/woff",
            Some("woff2") => "font/woff2",
            Some("ttf") => "font/ttf",
            Some("mp3") => "audio/mpeg",
            Some("txt") => "text/plain; charset=utf-8",
            _ => "application/octet-stream",
        }
    }
}

/// 前端路由（挂载在根路径）
pub fn frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(FrontendService::handle_index))
        .route("/", web::head().to(FrontendService::handle_index))
        .route("/favicon.ico", web::get().to(FrontendService::handle_favicon))
        .route(
            "/assets/{path:.*}",
            web::get().to(FrontendService::handle_static),
        );
}
