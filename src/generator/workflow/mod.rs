use crate::config::Config;
use crate::gateway::{GatewayError, RetrievalGateway};
use crate::generator::catalog::ProjectCatalog;
use crate::generator::catalog::fallback::fallback_projects;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet::{CatalogSource, DiskOutlet, Outlet, renderer_for};
use crate::types::RawRecord;
use crate::utils::threads::do_parallel_with_limit;

use anyhow::Result;
use tokio::time::Instant;

/// 启动画廊生成工作流
pub async fn launch(config: &Config) -> Result<()> {
    let context = GeneratorContext::new(config.clone())?;
    launch_with_context(&context).await
}

/// 使用给定上下文执行工作流
pub async fn launch_with_context(context: &GeneratorContext) -> Result<()> {
    let (catalog, source) = build_catalog(context).await;

    let outlet = DiskOutlet::new(
        &context.config.output_path,
        renderer_for(context.config.output_format),
    );
    outlet.save(&catalog, source).await?;

    Ok(())
}

/// 构建项目目录，仓库列表拉取失败或超时时回退到静态兜底项目
///
/// 拉取成功但没有任何仓库时得到空目录，由渲染器展示空提示。
pub async fn build_catalog(context: &GeneratorContext) -> (ProjectCatalog, CatalogSource) {
    let start_time = Instant::now();
    let mut catalog = context.new_catalog();

    if context.config.offline {
        println!("📴 离线模式，使用内置项目");
        catalog.load_enriched(fallback_projects(&context.profile_url()));
        return (catalog, CatalogSource::Fallback);
    }

    println!("🔍 拉取仓库列表...");
    let records = match fetch_records(context).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "⚠️ 仓库列表拉取失败，使用兜底项目");
            catalog.load_enriched(fallback_projects(&context.profile_url()));
            return (catalog, CatalogSource::Fallback);
        }
    };
    println!("   🔭 发现 {} 个仓库", records.len());

    println!("📖 并发拉取README...");
    let records = attach_readmes(
        context.gateway.as_ref(),
        records,
        context.config.github.max_parallels,
    )
    .await;

    catalog.load(&records);

    if let Some(cache) = &context.cache {
        let stats = cache.stats();
        println!(
            "📊 README缓存: 命中 {} 次，未命中 {} 次，命中率 {:.1}%",
            stats.hits,
            stats.misses,
            stats.hit_rate() * 100.0
        );
    }

    println!(
        "✅ 项目目录构建完成，共 {} 个项目，耗时 {:.2}秒",
        catalog.len(),
        start_time.elapsed().as_secs_f64()
    );
    (catalog, CatalogSource::Live)
}

/// 拉取仓库列表，超时后放弃进行中的请求
pub async fn fetch_records(context: &GeneratorContext) -> Result<Vec<RawRecord>, GatewayError> {
    let github = &context.config.github;
    match tokio::time::timeout(github.timeout(), context.gateway.list_records()).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout(github.timeout_seconds)),
    }
}

/// 并发拉取每个仓库的README
///
/// 单个仓库失败只影响该仓库（没有图片和兜底摘要），不影响其余仓库。
pub async fn attach_readmes(
    gateway: &dyn RetrievalGateway,
    records: Vec<RawRecord>,
    max_parallels: usize,
) -> Vec<RawRecord> {
    let readme_futures: Vec<_> = records
        .into_iter()
        .map(|mut record| async move {
            match gateway.fetch_readme(&record.full_name).await {
                Ok(text) => record.readme_text = Some(text),
                Err(e) => {
                    tracing::warn!(repo = %record.name, error = %e, "⚠️ README拉取失败");
                }
            }
            record
        })
        .collect();

    do_parallel_with_limit(readme_futures, max_parallels).await
}

// Include tests
#[cfg(test)]
mod tests;
