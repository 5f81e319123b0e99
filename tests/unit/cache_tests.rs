/*!
 * Tests for translation cache functionality
 */

use csvtrad::translation::cache::TranslationCache;

#[test]
fn test_cache_new_withDisabled_shouldNeverReturnEntries() {
    let cache = TranslationCache::new(false);
    cache.store("olá", "pt", "en", "hello");

    assert!(cache.get("olá", "pt", "en").is_none());
    assert!(cache.is_empty());
    assert!(!cache.is_enabled());
}

#[test]
fn test_cache_store_withEnabledCache_shouldStoreTranslation() {
    let cache = TranslationCache::new(true);
    cache.store("olá", "pt", "en", "hello");

    assert_eq!(cache.get("olá", "pt", "en"), Some("hello".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_get_withDifferentLanguages_shouldReturnNone() {
    let cache = TranslationCache::new(true);
    cache.store("olá", "pt", "en", "hello");

    assert!(cache.get("olá", "es", "en").is_none());
    assert!(cache.get("olá", "pt", "fr").is_none());
}

#[test]
fn test_cache_store_withSameKey_shouldOverwrite() {
    let cache = TranslationCache::new(true);
    cache.store("olá", "pt", "en", "hello");
    cache.store("olá", "pt", "en", "hi");

    assert_eq!(cache.get("olá", "pt", "en"), Some("hi".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new(true);
    cache.store("olá", "pt", "en", "hello");

    cache.get("olá", "pt", "en");
    cache.get("olá", "pt", "en");
    cache.get("tchau", "pt", "en");

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_cache_clear_shouldResetEntriesAndCounters() {
    let cache = TranslationCache::new(true);
    cache.store("olá", "pt", "en", "hello");
    cache.get("olá", "pt", "en");

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats().hits, 0);
    assert_eq!(cache.stats().hit_rate(), 0.0);
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache = TranslationCache::default();
    let clone = cache.clone();
    clone.store("olá", "pt", "en", "hello");

    assert_eq!(cache.get("olá", "pt", "en"), Some("hello".to_string()));
}

#[tokio::test]
async fn test_cache_concurrentWriters_shouldKeepAllEntries() {
    let cache = TranslationCache::new(true);
    let mut handles = Vec::new();

    for i in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.store(&format!("texto {}", i), "pt", "en", &format!("text {}", i));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.len(), 8);
    assert_eq!(cache.get("texto 3", "pt", "en"), Some("text 3".to_string()));
}
