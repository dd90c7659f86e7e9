use std::sync::Arc;

use lanewright_core::AppError;
use lanewright_domain::{BoardRole, DomainEvent};

use crate::test_support::{FakeBoardRepository, FakeEventTransport, actor};

use super::BoardService;

fn service() -> (Arc<FakeBoardRepository>, Arc<FakeEventTransport>, BoardService) {
    let boards = Arc::new(FakeBoardRepository::default());
    let transport = Arc::new(FakeEventTransport::default());
    let service = BoardService::new(boards.clone(), transport.clone());
    (boards, transport, service)
}

#[tokio::test]
async fn creating_list_and_card_emits_events() {
    let (boards, transport, service) = service();
    let board = boards.add_board("roadmap", "u1").await;
    boards.add_member(board.id, "u2", BoardRole::Member).await;

    let list = service
        .create_list(&actor("u2"), board.id, " Todo ")
        .await
        .unwrap_or_else(|_| unreachable!());
    let card = service
        .create_card(&actor("u2"), list.id, "Write docs", None)
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = service
        .create_card(&actor("u2"), list.id, "Review docs", Some(" ".to_owned()))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(list.title, "Todo");
    assert_eq!((card.position, second.position), (0, 1));
    assert!(second.description.is_none());

    let events: Vec<&str> = transport
        .envelopes()
        .await
        .iter()
        .map(|envelope| envelope.event.event_type())
        .collect();
    assert_eq!(events, vec!["list.created", "card.created", "card.created"]);
}

#[tokio::test]
async fn outsiders_and_blank_titles_are_rejected() {
    let (boards, transport, service) = service();
    let board = boards.add_board("roadmap", "u1").await;

    let outsider = service.create_list(&actor("u9"), board.id, "Todo").await;
    assert!(matches!(outsider, Err(AppError::Forbidden(_))));

    let blank = service.create_list(&actor("u1"), board.id, "   ").await;
    assert!(matches!(blank, Err(AppError::Validation(_))));
    assert!(transport.batches().await.is_empty());
}

#[tokio::test]
async fn moving_card_across_lists_renumbers_both_and_emits_move() {
    let (boards, transport, service) = service();
    let board = boards.add_board("roadmap", "u1").await;
    let todo = boards.add_list(board.id, "Todo", 0).await;
    let done = boards.add_list(board.id, "Done", 1).await;
    let first = boards.add_card(&todo, "First", 10).await;
    let moved = boards.add_card(&todo, "Moved", 20).await;
    let last = boards.add_card(&todo, "Last", 30).await;
    let shipped = boards.add_card(&done, "Shipped", 5).await;

    let card = service
        .move_card(&actor("u1"), moved.id, done.id, 0)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!((card.list_id, card.position), (done.id, 0));
    let todo_order: Vec<_> = boards
        .cards_in(todo.id)
        .await
        .iter()
        .map(|card| (card.id, card.position))
        .collect();
    assert_eq!(todo_order, vec![(first.id, 0), (last.id, 1)]);
    assert!(boards.card(shipped.id).await.is_some_and(|card| card.position == 1));

    let envelopes = transport.envelopes().await;
    assert_eq!(envelopes.len(), 1);
    assert!(matches!(
        envelopes[0].event,
        DomainEvent::CardMoved { from_list_id, to_list_id, .. }
            if from_list_id == todo.id && to_list_id == done.id
    ));
}

#[tokio::test]
async fn reordering_within_a_list_emits_nothing() {
    let (boards, transport, service) = service();
    let board = boards.add_board("roadmap", "u1").await;
    let todo = boards.add_list(board.id, "Todo", 0).await;
    let first = boards.add_card(&todo, "First", 0).await;
    let second = boards.add_card(&todo, "Second", 1).await;

    service
        .move_card(&actor("u1"), first.id, todo.id, 5)
        .await
        .unwrap_or_else(|_| unreachable!());

    let order: Vec<_> = boards
        .cards_in(todo.id)
        .await
        .iter()
        .map(|card| card.id)
        .collect();
    assert_eq!(order, vec![second.id, first.id]);
    assert!(transport.batches().await.is_empty());
}

#[tokio::test]
async fn cards_cannot_move_to_other_boards() {
    let (boards, _, service) = service();
    let board = boards.add_board("roadmap", "u1").await;
    let other = boards.add_board("ops", "u1").await;
    let todo = boards.add_list(board.id, "Todo", 0).await;
    let foreign = boards.add_list(other.id, "Foreign", 0).await;
    let card = boards.add_card(&todo, "Card", 0).await;

    let result = service.move_card(&actor("u1"), card.id, foreign.id, 0).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn moving_list_renumbers_densely() {
    let (boards, _, service) = service();
    let board = boards.add_board("roadmap", "u1").await;
    let todo = boards.add_list(board.id, "Todo", -1024).await;
    let doing = boards.add_list(board.id, "Doing", 7).await;
    let done = boards.add_list(board.id, "Done", 2048).await;

    let lists = service
        .move_list(&actor("u1"), done.id, 0)
        .await
        .unwrap_or_else(|_| unreachable!());

    let order: Vec<_> = lists.iter().map(|list| (list.id, list.position)).collect();
    assert_eq!(order, vec![(done.id, 0), (todo.id, 1), (doing.id, 2)]);
    assert!(boards.list(doing.id).await.is_some_and(|list| list.position == 2));
}

#[tokio::test]
async fn completion_emits_status_only_on_change() {
    let (boards, transport, service) = service();
    let board = boards.add_board("roadmap", "u1").await;
    let todo = boards.add_list(board.id, "Todo", 0).await;
    let card = boards.add_card(&todo, "Card", 0).await;

    service
        .set_card_completion(&actor("u1"), card.id, false)
        .await
        .unwrap_or_else(|_| unreachable!());
    let completed = service
        .set_card_completion(&actor("u1"), card.id, true)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(completed.is_completed);
    let envelopes = transport.envelopes().await;
    assert_eq!(envelopes.len(), 1);
    assert!(matches!(
        envelopes[0].event,
        DomainEvent::CardStatusChanged {
            is_completed: true,
            ..
        }
    ));
}
