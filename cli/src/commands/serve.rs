use quotes_api::AppState;
use quotes_common::config::Config;
use quotes_core::catalog::CatalogService;

use crate::terminal::print;

pub async fn serve(catalog: CatalogService, config: Config) -> anyhow::Result<()> {
    print::aligned_line("Address", config.bind_address());
    print::aligned_line("Default page size", config.pagination.default_page_size.to_string());
    print::aligned_line("Max page size", config.pagination.max_page_size.to_string());
    let data = match &config.data_file {
        Some(path) => path.display().to_string(),
        None => "in memory".to_string(),
    };
    print::aligned_line("Data", data);
    print::fat_separator();

    quotes_api::server::serve(AppState::new(catalog, config)).await?;
    Ok(())
}
