use std::cell::RefCell;

use tribute_core::{
    BadgeVariant, PortError, Ticket, TicketDesk, TicketError, TicketEvent, TicketFetchPort,
    TicketId, TicketIntent, TicketList, TicketMutationPort, TicketStatus,
};

fn ticket(id: &str, status: Option<TicketStatus>) -> Ticket {
    Ticket {
        id: TicketId::from(id),
        subject: format!("subject {id}"),
        sender_name: "Sam".to_owned(),
        sender_email: "sam@example.com".to_owned(),
        initial_content: "Hello".to_owned(),
        status,
        updated_at: Some("2024-03-01T10:00:00Z".to_owned()),
        date: None,
    }
}

#[derive(Default)]
struct FakeStore {
    tickets: RefCell<Vec<Ticket>>,
    fail_mutations: bool,
    calls: RefCell<Vec<String>>,
}

impl TicketFetchPort for &FakeStore {
    fn fetch_tickets(&self) -> Result<Vec<Ticket>, PortError> {
        self.calls.borrow_mut().push("fetch".to_owned());
        Ok(self.tickets.borrow().clone())
    }
}

impl TicketMutationPort for &FakeStore {
    fn set_ticket_status(&self, id: &TicketId, desired: TicketStatus) -> Result<(), PortError> {
        self.calls
            .borrow_mut()
            .push(format!("status:{id}:{}", desired.as_str()));
        if self.fail_mutations {
            return Err(PortError::Rejected("store unavailable".to_owned()));
        }
        for t in self.tickets.borrow_mut().iter_mut() {
            if &t.id == id {
                t.status = Some(desired);
            }
        }
        Ok(())
    }

    fn reply_to_ticket(&self, id: &TicketId, body: &str) -> Result<(), PortError> {
        self.calls.borrow_mut().push(format!("reply:{id}:{body}"));
        if self.fail_mutations {
            return Err(PortError::Rejected("store unavailable".to_owned()));
        }
        for t in self.tickets.borrow_mut().iter_mut() {
            if &t.id == id {
                t.status = Some(TicketStatus::Responded);
            }
        }
        Ok(())
    }
}

#[test]
fn selecting_a_then_b_selects_b() {
    let a = ticket("a", Some(TicketStatus::Open));
    let b = ticket("b", Some(TicketStatus::Open));
    let mut list = TicketList::with_tickets(vec![a.clone(), b.clone()]);

    list.select_ticket(&a);
    list.select_ticket(&b);
    assert_eq!(list.selected_ticket_id(), Some(&b.id));
    assert_eq!(list.selected().map(|t| &t.subject), Some(&b.subject));
}

#[test]
fn selecting_the_same_ticket_twice_is_a_no_op() {
    let a = ticket("a", Some(TicketStatus::Open));
    let mut list = TicketList::with_tickets(vec![a.clone()]);

    list.select_ticket(&a);
    list.select_ticket(&a);
    assert_eq!(list.selected_ticket_id(), Some(&a.id));
    assert_eq!(list.drain_events().len(), 1);
}

#[test]
fn badge_variant_follows_ticket_status() {
    assert_eq!(
        TicketList::status_variant(&ticket("a", Some(TicketStatus::Open))),
        BadgeVariant::Info
    );
    assert_eq!(
        TicketList::status_variant(&ticket("b", Some(TicketStatus::Closed))),
        BadgeVariant::Success
    );
    assert_eq!(
        TicketList::status_variant(&ticket("c", None)),
        BadgeVariant::Default
    );
}

#[test]
fn close_request_on_closed_ticket_is_reopen() {
    let mut list = TicketList::new();
    let closed = ticket("a", Some(TicketStatus::Closed));
    let open = ticket("b", Some(TicketStatus::Open));

    assert_eq!(
        list.request_delete_or_close(&closed),
        TicketIntent::Reopen { id: closed.id.clone() }
    );
    assert_eq!(
        list.request_delete_or_close(&open),
        TicketIntent::Close { id: open.id.clone() }
    );
    assert_eq!(closed.status, Some(TicketStatus::Closed));
    assert_eq!(open.status, Some(TicketStatus::Open));
}

#[test]
fn empty_reply_is_rejected() {
    let mut list = TicketList::new();
    let t = ticket("a", Some(TicketStatus::Open));
    let err = list.compose_reply(&t, "   ").expect_err("empty body");
    assert!(matches!(err, TicketError::Validation(_)));

    let intent = list.compose_reply(&t, " thanks ").expect("reply");
    assert_eq!(
        intent,
        TicketIntent::Reply {
            id: t.id.clone(),
            body: "thanks".to_owned(),
        }
    );
}

#[test]
fn fetch_keeps_server_order_and_drops_vanished_selection() {
    let mut list = TicketList::new();
    let token = list.begin_refresh();
    assert!(list.is_loading());
    assert!(list.apply_fetch(
        token,
        Ok(vec![
            ticket("z", None),
            ticket("a", Some(TicketStatus::Open)),
        ])
    ));
    let ids: Vec<_> = list.tickets().iter().map(|t| t.id.0.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);

    let z = list.tickets()[0].clone();
    list.select_ticket(&z);
    let token = list.begin_refresh();
    list.apply_fetch(token, Ok(vec![ticket("a", Some(TicketStatus::Open))]));
    assert!(list.selected_ticket_id().is_none());
}

#[test]
fn stale_fetch_is_ignored() {
    let mut list = TicketList::new();
    let old = list.begin_refresh();
    let current = list.begin_refresh();

    assert!(list.apply_fetch(current, Ok(vec![ticket("new", None)])));
    assert!(!list.apply_fetch(old, Ok(vec![ticket("old", None)])));
    assert_eq!(list.tickets()[0].id.0, "new");

    let after_detach = list.begin_refresh();
    list.detach();
    assert!(!list.apply_fetch(after_detach, Err(PortError::Transport("late".to_owned()))));
    assert!(list.last_error().is_none());
}

#[test]
fn reset_clears_list_and_keeps_pending_fetch_stale() {
    let mut list = TicketList::with_tickets(vec![ticket("a", None)]);
    let first = list.tickets()[0].clone();
    list.select_ticket(&first);
    let pending = list.begin_refresh();

    list.reset();
    assert!(list.tickets().is_empty());
    assert!(list.selected_ticket_id().is_none());
    assert!(!list.is_loading());

    let fresh = list.begin_refresh();
    assert_ne!(fresh, pending);
    assert!(!list.apply_fetch(pending, Ok(vec![ticket("late", None)])));
    assert!(list.tickets().is_empty());
}

#[test]
fn failed_fetch_keeps_previous_list() {
    let mut list = TicketList::new();
    let token = list.begin_refresh();
    list.apply_fetch(token, Ok(vec![ticket("a", None)]));

    let token = list.begin_refresh();
    list.apply_fetch(token, Err(PortError::Transport("down".to_owned())));
    assert_eq!(list.tickets().len(), 1);
    assert!(matches!(list.last_error(), Some(TicketError::Fetch(_))));
}

#[test]
fn desk_dispatch_closes_then_reloads() {
    let store = FakeStore::default();
    store
        .tickets
        .borrow_mut()
        .push(ticket("a", Some(TicketStatus::Open)));
    let desk = TicketDesk::new(&store, &store);
    let mut list = TicketList::new();
    desk.refresh(&mut list).expect("initial fetch");

    let a = list.tickets()[0].clone();
    let intent = list.request_delete_or_close(&a);
    desk.dispatch(&mut list, &intent).expect("close");

    assert_eq!(list.tickets()[0].status, Some(TicketStatus::Closed));
    assert_eq!(
        store.calls.borrow().as_slice(),
        ["fetch", "status:a:closed", "fetch"]
    );
}

#[test]
fn desk_reply_marks_ticket_responded_after_reload() {
    let store = FakeStore::default();
    store
        .tickets
        .borrow_mut()
        .push(ticket("a", Some(TicketStatus::Open)));
    let desk = TicketDesk::new(&store, &store);
    let mut list = TicketList::new();
    desk.refresh(&mut list).expect("initial fetch");

    let a = list.tickets()[0].clone();
    let intent = list.compose_reply(&a, "We are on it").expect("reply");
    desk.dispatch(&mut list, &intent).expect("reply sent");
    assert_eq!(list.tickets()[0].status, Some(TicketStatus::Responded));
}

#[test]
fn failed_mutation_leaves_list_unchanged() {
    let store = FakeStore {
        fail_mutations: true,
        ..FakeStore::default()
    };
    store
        .tickets
        .borrow_mut()
        .push(ticket("a", Some(TicketStatus::Open)));
    let desk = TicketDesk::new(&store, &store);
    let mut list = TicketList::new();
    desk.refresh(&mut list).expect("initial fetch");
    list.drain_events();

    let a = list.tickets()[0].clone();
    let intent = list.request_delete_or_close(&a);
    let err = desk.dispatch(&mut list, &intent).expect_err("mutation fails");
    assert!(matches!(err, TicketError::Mutation { .. }));
    assert_eq!(list.tickets()[0].status, Some(TicketStatus::Open));
    assert_eq!(store.calls.borrow().len(), 2);

    let events = list.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, TicketEvent::MutationFailed { message, .. } if message == "store unavailable")));
}
