    use super::*;

    #[test]
    fn test_finish_reason_parse_stop() {
        assert_eq!(FinishReason::parse("STOP"), FinishReason::Stop);
    }

    #[test]
    fn test_finish_reason_parse_max_tokens() {
        assert_eq!(FinishReason::parse("MAX_TOKENS"), FinishReason::MaxTokens);
    }

    #[test]
    fn test_finish_reason_parse_other() {
        assert_eq!(
            FinishReason::parse("SAFETY"),
            FinishReason::Other("SAFETY".to_string())
        );
    }

    #[test]
    fn test_finish_reason_success() {
        assert!(FinishReason::Stop.is_success());
        assert!(FinishReason::MaxTokens.is_success());
        assert!(!FinishReason::Other("SAFETY".to_string()).is_success());
        assert!(!FinishReason::Other("RECITATION".to_string()).is_success());
    }

    #[test]
    fn test_finish_reason_display_round_trips() {
        assert_eq!(FinishReason::Stop.to_string(), "STOP");
        assert_eq!(FinishReason::MaxTokens.to_string(), "MAX_TOKENS");
        assert_eq!(FinishReason::Other("SAFETY".to_string()).to_string(), "SAFETY");
    }

    #[test]
    fn test_generation_chunk_default() {
        let chunk = GenerationChunk::default();
        assert!(chunk.delta.is_none());
        assert!(chunk.finish_reason.is_none());
    }
