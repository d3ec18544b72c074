//! Integration tests for events

#[cfg(test)]
mod tests {
    use itpam_events::*;

    #[tokio::test]
    async fn test_event_sender_emits() {
        let (tx, mut rx) = channel();

        tx.emit_warning("test warning");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            AppEvent::General(GeneralEvent::Warning { .. })
        ));
        assert_eq!(event1.level(), EventLevel::Warn);

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_absent_sender_is_silent() {
        let none: Option<EventSender> = None;
        none.emit_debug("nobody listens");
    }

    #[test]
    fn test_wait_event_serialization() {
        let event = AppEvent::Wait(WaitEvent::Finished {
            roid: "42".into(),
            status: "Completed".into(),
            completed: true,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "wait");
        assert_eq!(json["event"]["type"], "Finished");
        assert_eq!(json["event"]["status"], "Completed");
    }
}
