    use super::*;

    #[test]
    fn test_get_missing_key() {
        let cache: MemoryCache<String> = MemoryCache::new();
        assert!(cache.get("missing").is_none());
        assert!(!cache.contains("missing"));
    }

    #[test]
    fn test_insert_and_get() {
        let cache = MemoryCache::new();
        cache.insert("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert!(cache.contains("k"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let cache = MemoryCache::new();
        cache.insert("k".to_string(), "first".to_string());
        cache.insert("k".to_string(), "second".to_string());
        assert_eq!(cache.get("k").as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_vec_values() {
        let cache: MemoryCache<Vec<String>> = MemoryCache::new();
        cache.insert("kw".to_string(), vec!["rust".to_string(), "cargo".to_string()]);
        assert_eq!(cache.get("kw").unwrap().len(), 2);
    }

    #[test]
    fn test_trait_object_usage() {
        let cache: std::sync::Arc<dyn Cache<String>> = std::sync::Arc::new(MemoryCache::new());
        cache.insert("k".to_string(), "v".to_string());
        assert!(cache.contains("k"));
    }
