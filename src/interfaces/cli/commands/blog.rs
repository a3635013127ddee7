//! Blog cache commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::BlogService;
use crate::utils::time::format_duration_human;

/// 从远端拉取并写入持久化缓存
pub async fn blog_fetch(service: &BlogService) -> Result<(), CliError> {
    println!(
        "{} {}",
        "Fetching blog data from".yellow(),
        service.source_description().blue()
    );

    let entry = service.refresh().await?;

    println!(
        "  {} {} posts, {} categories",
        "Fetched".green(),
        entry.payload.posts.len().to_string().cyan(),
        entry.payload.categories.len().to_string().cyan()
    );
    for post in &entry.payload.posts {
        println!(
            "    {} {} {}",
            format!("#{}", post.id).dimmed(),
            post.title.white(),
            format!("({})", post.slug).dimmed()
        );
    }
    println!("  {} {}", "Cache store:".dimmed(), service.store_name());
    Ok(())
}

pub fn blog_cache_info(service: &BlogService, json: bool) -> Result<(), CliError> {
    let info = service.cache_info();

    if json {
        let out = serde_json::to_string_pretty(&info)
            .map_err(|e| CliError::ParseError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if !info.exists {
        println!("{}", "No persisted blog cache".yellow());
        return Ok(());
    }

    let state = if info.is_expired {
        "expired".red()
    } else {
        "fresh".green()
    };
    println!("{} {}", "Blog cache:".bold(), state);
    println!("  {} {}", "Store:".dimmed(), service.store_name());
    println!(
        "  {} {}",
        "Age:".dimmed(),
        format_duration_human(info.age / 1000)
    );
    println!("  {} {} bytes", "Size:".dimmed(), info.data_size);
    if let Some(dt) = info
        .timestamp
        .and_then(chrono::DateTime::from_timestamp_millis)
    {
        println!("  {} {}", "Fetched at:".dimmed(), dt.to_rfc3339());
    }
    Ok(())
}

pub fn blog_clear_cache(service: &BlogService) -> Result<(), CliError> {
    service.clear_cache();
    println!("{}", "Blog cache cleared".green());
    Ok(())
}
