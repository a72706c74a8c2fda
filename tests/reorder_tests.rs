//! Reorder tests
//!
//! Items are reordered through the public tool surface and the resulting
//! order is observed through list output, the same way a client would.

use daylog_mcp::DaylogServerHandler;
use tempfile::NamedTempFile;

fn get_test_handler() -> (DaylogServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = DaylogServerHandler::new(temp_file.path().to_str().unwrap(), false).unwrap();
    (handler, temp_file)
}

/// Captures land on top, so capturing a, b, c leaves the list c, b, a.
async fn capture_all(handler: &DaylogServerHandler, ids: &[&str]) {
    for id in ids {
        handler
            .handle_capture(id.to_string(), format!("Item {id}"), None, None, None)
            .await
            .unwrap();
    }
}

async fn active_order(handler: &DaylogServerHandler) -> Vec<String> {
    let list = handler
        .handle_list(Some("active".to_string()), None, None, Some(true))
        .await
        .unwrap();
    list.lines()
        .filter_map(|line| {
            let start = line.find('[')? + 1;
            let end = line.find(']')?;
            Some(line[start..end].to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_reorder_to_slot_of_earlier_item() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["c", "b", "a"]).await;
    assert_eq!(active_order(&handler).await, ["a", "b", "c"]);

    // c takes b's slot: lands between a and b
    handler
        .handle_reorder("c".to_string(), Some("b".to_string()))
        .await
        .unwrap();
    assert_eq!(active_order(&handler).await, ["a", "c", "b"]);
}

#[tokio::test]
async fn test_reorder_to_slot_of_later_item() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["c", "b", "a"]).await;

    // a moving down onto c's slot lands just after c
    handler
        .handle_reorder("a".to_string(), Some("c".to_string()))
        .await
        .unwrap();
    assert_eq!(active_order(&handler).await, ["b", "c", "a"]);
}

#[tokio::test]
async fn test_reorder_to_end() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["c", "b", "a"]).await;

    handler.handle_reorder("a".to_string(), None).await.unwrap();
    assert_eq!(active_order(&handler).await, ["b", "c", "a"]);
}

#[tokio::test]
async fn test_reorder_noop_cases() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["c", "b", "a"]).await;

    // Own slot
    handler
        .handle_reorder("b".to_string(), Some("b".to_string()))
        .await
        .unwrap();
    assert_eq!(active_order(&handler).await, ["a", "b", "c"]);

    // Already last
    handler.handle_reorder("c".to_string(), None).await.unwrap();
    assert_eq!(active_order(&handler).await, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_reorder_unknown_ids() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["a"]).await;

    let result = handler.handle_reorder("missing".to_string(), None).await;
    assert!(result.is_err());

    let result = handler
        .handle_reorder("a".to_string(), Some("missing".to_string()))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_reorder_across_lists_rejected() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["stay", "move"]).await;
    handler
        .handle_change_status(vec!["move".to_string()], "parked".to_string())
        .await
        .unwrap();

    // The target lives on another list, so it is not in the moved item's
    // ordering and the move fails.
    let result = handler
        .handle_reorder("stay".to_string(), Some("move".to_string()))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_reorder_only_touches_its_own_list() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["p2", "p1"]).await;
    handler
        .handle_change_status(
            vec!["p1".to_string(), "p2".to_string()],
            "parked".to_string(),
        )
        .await
        .unwrap();
    capture_all(&handler, &["c", "b", "a"]).await;

    handler
        .handle_reorder("a".to_string(), Some("c".to_string()))
        .await
        .unwrap();

    // The parked list is untouched
    let parked = handler
        .handle_list(Some("parked".to_string()), None, None, Some(true))
        .await
        .unwrap();
    let pos = |id: &str| parked.find(&format!("[{id}]")).unwrap();
    assert!(pos("p2") < pos("p1"));
}

#[tokio::test]
async fn test_repeated_reorder_survives_many_moves() {
    let (handler, _temp_file) = get_test_handler();
    capture_all(&handler, &["c", "b", "a"]).await;

    // Squeeze b into the same gap over and over. Eventually the gap is
    // exhausted and the list is renumbered; the order must stay correct
    // throughout.
    for _ in 0..60 {
        handler
            .handle_reorder("b".to_string(), Some("b".to_string()))
            .await
            .unwrap();
        handler
            .handle_reorder("c".to_string(), Some("b".to_string()))
            .await
            .unwrap();
        handler
            .handle_reorder("b".to_string(), Some("c".to_string()))
            .await
            .unwrap();
    }
    assert_eq!(active_order(&handler).await, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_order_survives_reload() {
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path().to_str().unwrap().to_string();

    {
        let handler = DaylogServerHandler::new(&path, false).unwrap();
        capture_all(&handler, &["c", "b", "a"]).await;
        handler
            .handle_reorder("a".to_string(), Some("c".to_string()))
            .await
            .unwrap();
        assert_eq!(active_order(&handler).await, ["b", "c", "a"]);
    }

    let handler = DaylogServerHandler::new(&path, false).unwrap();
    assert_eq!(active_order(&handler).await, ["b", "c", "a"]);
}
