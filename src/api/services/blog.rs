//! 博客数据端点

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::trace;

use crate::services::BlogService;

use super::error_code::ErrorCode;
use super::helpers::{error_response, success_response};
use super::types::{CategoriesResponse, PostResponse, PostsQuery, PostsResponse};

pub struct BlogApi;

impl BlogApi {
    /// `GET /blog`：完整快照（文章、分类、来源）
    pub async fn snapshot(service: web::Data<Arc<BlogService>>) -> HttpResponse {
        let snapshot = service.fetch_blog_data().await;
        trace!("Serving blog snapshot from {}", snapshot.source);
        success_response(snapshot)
    }

    /// `GET /blog/posts?category=`
    pub async fn posts(
        service: web::Data<Arc<BlogService>>,
        query: web::Query<PostsQuery>,
    ) -> HttpResponse {
        let snapshot = service.fetch_blog_data().await;
        let category = query
            .into_inner()
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "all".to_string());

        let posts = snapshot
            .data
            .filter_by_category(&category)
            .into_iter()
            .cloned()
            .collect();

        success_response(PostsResponse {
            posts,
            category,
            source: snapshot.source,
        })
    }

    /// `GET /blog/posts/{slug}`
    pub async fn post(
        service: web::Data<Arc<BlogService>>,
        slug: web::Path<String>,
    ) -> HttpResponse {
        let snapshot = service.fetch_blog_data().await;
        match snapshot.data.find_post(&slug) {
            Some(post) => success_response(PostResponse {
                post: post.clone(),
                source: snapshot.source,
            }),
            None => error_response(
                StatusCode::NOT_FOUND,
                ErrorCode::BlogPostNotFound,
                &format!("Post '{}' not found", slug),
            ),
        }
    }

    /// `GET /blog/categories`
    pub async fn categories(service: web::Data<Arc<BlogService>>) -> HttpResponse {
        let snapshot = service.fetch_blog_data().await;
        success_response(CategoriesResponse {
            categories: snapshot.data.categories,
            source: snapshot.source,
        })
    }

    /// `GET /blog/cache`：持久化缓存状态
    pub async fn cache_info(service: web::Data<Arc<BlogService>>) -> HttpResponse {
        success_response(service.cache_info())
    }
}
