/*!
 * Common test utilities for the csvtrad test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use csvtrad::app_config::TranslationConfig;
use csvtrad::providers::mock::MockProvider;
use csvtrad::translation::{Orchestrator, TranslationAdapter};

/// Route log output through the test harness
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small product sheet in Portuguese
pub fn create_test_csv(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "nome,descricao,preco,contato\n\
                   RESTAURANTE,Comida boa em https://example.com,R$ 20,test@example.com\n";
    create_test_file(dir, filename, content)
}

/// Portuguese to English configuration without retry delays
pub fn pt_en_config() -> TranslationConfig {
    TranslationConfig::builder("pt", "en")
        .retry_backoff_ms(0)
        .build()
        .expect("valid test config")
}

/// Orchestrator backed by a mock provider
pub fn orchestrator_with(config: TranslationConfig, provider: MockProvider) -> Orchestrator {
    let adapter = TranslationAdapter::new(
        Some(Arc::new(provider)),
        config.max_retries(),
        config.retry_backoff_ms(),
    );
    Orchestrator::silent(config, adapter)
}
