//! End-to-end tests driving full games through the registry, with an
//! in-memory ledger and a channel-backed event sink.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quizfire::score::{CHALLENGE_REWARD, Grade, PARTICIPATION_REWARD, WINNER_REWARD};
use quizfire::{EconomyLedger, EventSink, GameRegistry, QuizfireError};
use quizfire_protocol::{
    Challenge, Choice, ConnectionId, GameRecord, Question, RoomCode, ServerEvent, Submission,
    UserId,
};
use quizfire_room::RoomError;
use tokio::sync::mpsc;

// =========================================================================
// Mock collaborators
// =========================================================================

#[derive(Debug, Default)]
struct LedgerState {
    charges: Vec<(UserId, u64)>,
    credits: Vec<(UserId, u64)>,
    refunds: Vec<(UserId, u64)>,
    challenges: Vec<(UserId, Challenge)>,
    history: Vec<(UserId, GameRecord)>,
}

#[derive(Clone, Default)]
struct MockLedger(Arc<Mutex<LedgerState>>);

impl MockLedger {
    fn state(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.0.lock().unwrap()
    }
}

impl EconomyLedger for MockLedger {
    type Error = std::convert::Infallible;

    async fn charge_entry(&self, user: &UserId, amount: u64) -> Result<(), Self::Error> {
        self.state().charges.push((user.clone(), amount));
        Ok(())
    }

    async fn credit(&self, user: &UserId, amount: u64) -> Result<(), Self::Error> {
        self.state().credits.push((user.clone(), amount));
        Ok(())
    }

    async fn refund_entry(&self, user: &UserId, amount: u64) -> Result<(), Self::Error> {
        self.state().refunds.push((user.clone(), amount));
        Ok(())
    }

    async fn record_challenge_completion(
        &self,
        user: &UserId,
        challenge: Challenge,
    ) -> Result<(), Self::Error> {
        self.state().challenges.push((user.clone(), challenge));
        Ok(())
    }

    async fn append_game_history(
        &self,
        user: &UserId,
        record: GameRecord,
    ) -> Result<(), Self::Error> {
        self.state().history.push((user.clone(), record));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Delivery {
    Room(RoomCode),
    Connection(ConnectionId),
}

#[derive(Clone)]
struct ChannelSink(mpsc::UnboundedSender<(Delivery, ServerEvent)>);

impl EventSink for ChannelSink {
    fn send_to_room(&self, code: &RoomCode, event: ServerEvent) {
        let _ = self.0.send((Delivery::Room(code.clone()), event));
    }

    fn send_to_connection(&self, connection: &ConnectionId, event: ServerEvent) {
        let _ = self.0.send((Delivery::Connection(connection.clone()), event));
    }
}

// =========================================================================
// Harness
// =========================================================================

struct Harness {
    registry: GameRegistry<MockLedger, ChannelSink>,
    ledger: MockLedger,
    events: mpsc::UnboundedReceiver<(Delivery, ServerEvent)>,
}

/// Opt-in test logging, e.g. `RUST_LOG=quizfire=debug cargo test`.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn harness() -> Harness {
    init_tracing();
    let ledger = MockLedger::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let registry = GameRegistry::new(ledger.clone(), ChannelSink(tx));
    Harness {
        registry,
        ledger,
        events: rx,
    }
}

impl Harness {
    /// Waits for the first event matching the predicate, skipping the rest.
    /// The generous timeout resolves instantly under paused time when the
    /// event never arrives.
    async fn wait_for(
        &mut self,
        pred: impl Fn(&ServerEvent) -> bool,
    ) -> (Delivery, ServerEvent) {
        tokio::time::timeout(Duration::from_secs(600), async {
            loop {
                let (delivery, event) =
                    self.events.recv().await.expect("event stream ended");
                if pred(&event) {
                    return (delivery, event);
                }
            }
        })
        .await
        .expect("expected event never arrived")
    }

    /// Drains registry close notifications until the given room count is
    /// reached, yielding so the actor task can finish.
    async fn wait_room_count(&mut self, expected: usize) {
        for _ in 0..100 {
            self.registry.prune_closed();
            if self.registry.room_count() == expected {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("room count never reached {expected}");
    }
}

fn uid(name: &str) -> UserId {
    UserId(name.into())
}

fn conn(name: &str) -> ConnectionId {
    ConnectionId(format!("conn-{name}"))
}

fn choice_quiz() -> Vec<Question> {
    vec![Question::MultipleChoice {
        text: "pick A".into(),
        points: 10.0,
        duration_secs: 30,
        choices: vec![
            Choice {
                text: "A".into(),
                is_correct: true,
            },
            Choice {
                text: "B".into(),
                is_correct: false,
            },
        ],
    }]
}

fn open_quiz() -> Vec<Question> {
    vec![Question::OpenEnded {
        text: "explain".into(),
        points: 40.0,
    }]
}

fn picks(texts: &[&str]) -> Submission {
    Submission::Choices(texts.iter().map(|s| s.to_string()).collect())
}

/// Creates a room, joins ada and bob, and returns the code.
async fn setup_room(h: &mut Harness, quiz: Vec<Question>, entry_price: u64) -> RoomCode {
    let code = h
        .registry
        .create_room(quiz, uid("host"), conn("host"), false, entry_price)
        .unwrap();
    for name in ["ada", "bob"] {
        h.registry
            .join(&code, uid(name), conn(name), name.into(), false)
            .await
            .unwrap();
    }
    code
}

// =========================================================================
// Lobby and registry
// =========================================================================

#[tokio::test(start_paused = true)]
async fn create_room_emits_code_to_host() {
    let mut h = harness();
    let code = h
        .registry
        .create_room(choice_quiz(), uid("host"), conn("host"), false, 0)
        .unwrap();
    assert_eq!(code.0.len(), 4);

    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::RoomCreated { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("host")));
    assert_eq!(event, ServerEvent::RoomCreated { code });
}

#[tokio::test(start_paused = true)]
async fn codes_are_unique_across_live_rooms() {
    let mut h = harness();
    let mut codes = Vec::new();
    for _ in 0..20 {
        let code = h
            .registry
            .create_room(choice_quiz(), uid("host"), conn("host"), false, 0)
            .unwrap();
        assert!(!codes.contains(&code));
        codes.push(code);
    }
    assert_eq!(h.registry.room_count(), 20);
}

#[tokio::test(start_paused = true)]
async fn join_missing_room_fails() {
    let mut h = harness();
    let result = h
        .registry
        .join(
            &RoomCode("0000".into()),
            uid("ada"),
            conn("ada"),
            "ada".into(),
            false,
        )
        .await;
    assert!(matches!(
        result,
        Err(QuizfireError::Room(RoomError::NotFound(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn rejected_join_refunds_the_entry_charge() {
    let mut h = harness();
    let code = h
        .registry
        .create_room(choice_quiz(), uid("host"), conn("host"), false, 10)
        .unwrap();
    h.registry
        .join(&code, uid("ada"), conn("ada"), "ada".into(), false)
        .await
        .unwrap();

    let handle = h.registry.room(&code).unwrap().clone();
    handle.toggle_lock(uid("host")).await.unwrap();

    let result = h
        .registry
        .join(&code, uid("bob"), conn("bob"), "bob".into(), false)
        .await;
    assert!(matches!(
        result,
        Err(QuizfireError::Room(RoomError::Locked(_)))
    ));

    let state = h.ledger.state();
    assert_eq!(state.charges, vec![(uid("ada"), 10), (uid("bob"), 10)]);
    // The lost race is compensated.
    assert_eq!(state.refunds, vec![(uid("bob"), 10)]);
}

#[tokio::test(start_paused = true)]
async fn kicked_player_is_banned_by_name() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.kick(uid("host"), "bob".into()).await.unwrap();
    let (delivery, _) = h.wait_for(|e| matches!(e, ServerEvent::Kicked)).await;
    assert_eq!(delivery, Delivery::Connection(conn("bob")));

    // Same display name, fresh identity: still banned.
    let result = h
        .registry
        .join(&code, uid("bob2"), conn("bob2"), "bob".into(), false)
        .await;
    assert!(matches!(
        result,
        Err(QuizfireError::Room(RoomError::BannedName(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn non_host_actions_are_rejected_to_sender_only() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("ada")).await.unwrap();

    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Rejected { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("ada")));
    let ServerEvent::Rejected { reason } = event else {
        unreachable!()
    };
    assert!(reason.contains("host"));
}

#[tokio::test(start_paused = true)]
async fn starting_needs_two_active_players() {
    let mut h = harness();
    let code = h
        .registry
        .create_room(choice_quiz(), uid("host"), conn("host"), false, 0)
        .unwrap();
    h.registry
        .join(&code, uid("ada"), conn("ada"), "ada".into(), false)
        .await
        .unwrap();
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Rejected { .. }))
        .await;
    let ServerEvent::Rejected { reason } = event else {
        unreachable!()
    };
    assert!(reason.contains("two active players"));
}

// =========================================================================
// Turn sequencing
// =========================================================================

#[tokio::test(start_paused = true)]
async fn full_game_early_close_and_settlement() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::GameCanStart)).await;

    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::QuestionBroadcast { .. }))
        .await;
    let ServerEvent::QuestionBroadcast { index, total, .. } = event else {
        unreachable!()
    };
    assert_eq!((index, total), (0, 1));

    // Both answer correctly; the second submission closes the question
    // without the timer expiring.
    handle.submit(uid("ada"), picks(&["A"])).await.unwrap();
    handle.submit(uid("bob"), picks(&["A"])).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionTimedOut))
        .await;

    // Ada answered first and takes the one-shot +20% bonus.
    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::AnswerResult { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("ada")));
    let ServerEvent::AnswerResult { verdict } = event else {
        unreachable!()
    };
    assert_eq!(verdict.points, 10.0);
    assert_eq!(verdict.bonus, 2.0);
    assert_eq!(verdict.total_points, 12.0);

    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::AnswerResult { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("bob")));
    let ServerEvent::AnswerResult { verdict } = event else {
        unreachable!()
    };
    assert_eq!(verdict.bonus, 0.0);
    assert_eq!(verdict.total_points, 10.0);

    // Advancing past the last question settles the game.
    handle.advance(uid("host")).await.unwrap();
    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::GameFinished { .. }))
        .await;
    let ServerEvent::GameFinished { summary } = event else {
        unreachable!()
    };
    assert_eq!(summary.winners, vec!["ada".to_string()]);

    // Single-question quiz: both players drew and completed Flawless.
    let state = h.ledger.state();
    assert!(state
        .credits
        .contains(&(uid("ada"), WINNER_REWARD + CHALLENGE_REWARD)));
    assert!(state
        .credits
        .contains(&(uid("bob"), PARTICIPATION_REWARD + CHALLENGE_REWARD)));
    assert_eq!(state.history.len(), 2);
    let ada_record = &state.history.iter().find(|(u, _)| u == &uid("ada")).unwrap().1;
    assert!(ada_record.won);
    assert_eq!(ada_record.points, 12.0);
}

#[tokio::test(start_paused = true)]
async fn duplicate_submission_is_rejected_as_noop() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionBroadcast { .. }))
        .await;

    handle.submit(uid("ada"), picks(&["A"])).await.unwrap();
    handle.submit(uid("ada"), picks(&["B"])).await.unwrap();

    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Rejected { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("ada")));
    let ServerEvent::Rejected { reason } = event else {
        unreachable!()
    };
    assert!(reason.contains("already answered"));

    // The original answer stands: ada still scores full points at close.
    handle.submit(uid("bob"), picks(&[])).await.unwrap();
    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::AnswerResult { .. }))
        .await;
    let ServerEvent::AnswerResult { verdict } = event else {
        unreachable!()
    };
    assert_eq!(verdict.points, 10.0);
}

#[tokio::test(start_paused = true)]
async fn advance_is_gated_on_all_answered() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionBroadcast { .. }))
        .await;

    handle.submit(uid("ada"), picks(&["A"])).await.unwrap();
    handle.advance(uid("host")).await.unwrap();

    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Rejected { .. }))
        .await;
    let ServerEvent::Rejected { reason } = event else {
        unreachable!()
    };
    assert!(reason.contains("answered"));

    handle.submit(uid("bob"), picks(&["A"])).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionTimedOut))
        .await;
    handle.advance(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::GameFinished { .. }))
        .await;
}

#[tokio::test(start_paused = true)]
async fn unanswered_question_times_out_with_empty_answers() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionBegins)).await;

    // Nobody submits; paused time races through the full 30 s run.
    h.wait_for(|e| matches!(e, ServerEvent::QuestionTimedOut))
        .await;

    for _ in 0..2 {
        let (_, event) = h
            .wait_for(|e| matches!(e, ServerEvent::AnswerResult { .. }))
            .await;
        let ServerEvent::AnswerResult { verdict } = event else {
            unreachable!()
        };
        assert_eq!(verdict.points, 0.0);
    }

    // Empty answers count as answers: advancing works and both tie at 0.
    handle.advance(uid("host")).await.unwrap();
    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::GameFinished { .. }))
        .await;
    let ServerEvent::GameFinished { summary } = event else {
        unreachable!()
    };
    assert_eq!(summary.winners.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_and_panic_accelerates() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionBegins)).await;

    handle.pause(uid("host")).await.unwrap();
    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Paused { .. }))
        .await;
    assert_eq!(delivery, Delivery::Room(code.clone()));
    let ServerEvent::Paused { remaining } = event else {
        unreachable!()
    };
    assert!(remaining <= 30);

    handle.resume(uid("host")).await.unwrap();
    handle.activate_panic(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::PanicActivated))
        .await;
}

#[tokio::test(start_paused = true)]
async fn leaver_during_pregame_countdown_aborts_the_launch() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    handle.leave(uid("ada")).await.unwrap();

    // The pre-game expiry finds a single active player and backs out.
    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Rejected { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("host")));
    let ServerEvent::Rejected { reason } = event else {
        unreachable!()
    };
    assert!(reason.contains("two active players"));

    // Back in the lobby: the room accepts joins and can start over.
    h.registry
        .join(&code, uid("eve"), conn("eve"), "eve".into(), false)
        .await
        .unwrap();
    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::GameCanStart)).await;
}

// =========================================================================
// Open-ended grading
// =========================================================================

#[tokio::test(start_paused = true)]
async fn host_grades_open_ended_answers() {
    let mut h = harness();
    let code = setup_room(&mut h, open_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionBroadcast { .. }))
        .await;

    handle
        .submit(uid("ada"), Submission::Text("a fine essay".into()))
        .await
        .unwrap();
    handle
        .submit(uid("bob"), Submission::Text("less so".into()))
        .await
        .unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionTimedOut))
        .await;

    handle
        .grade(uid("host"), "ada".into(), 0, Grade::Hundred)
        .await
        .unwrap();
    let (delivery, event) = h
        .wait_for(|e| {
            matches!(e, ServerEvent::AnswerResult { verdict } if verdict.points > 0.0)
        })
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("ada")));
    let ServerEvent::AnswerResult { verdict } = event else {
        unreachable!()
    };
    assert_eq!(verdict.points, 40.0);
    assert_eq!(verdict.total_points, 40.0);

    handle
        .grade(uid("host"), "bob".into(), 0, Grade::Fifty)
        .await
        .unwrap();
    handle.advance(uid("host")).await.unwrap();

    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::GameFinished { .. }))
        .await;
    let ServerEvent::GameFinished { summary } = event else {
        unreachable!()
    };
    assert_eq!(summary.winners, vec!["ada".to_string()]);
    let bob = summary.players.iter().find(|p| p.name == "bob").unwrap();
    assert_eq!(bob.points, 20.0);
}

#[tokio::test(start_paused = true)]
async fn grading_a_choice_question_is_rejected() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::QuestionBroadcast { .. }))
        .await;

    handle.submit(uid("ada"), picks(&["A"])).await.unwrap();
    handle
        .grade(uid("host"), "ada".into(), 0, Grade::Fifty)
        .await
        .unwrap();

    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::Rejected { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("host")));
    let ServerEvent::Rejected { reason } = event else {
        unreachable!()
    };
    assert!(reason.contains("open-ended"));

    // The automatic verdict stands untouched.
    handle.submit(uid("bob"), picks(&["B"])).await.unwrap();
    let (delivery, event) = h
        .wait_for(|e| matches!(e, ServerEvent::AnswerResult { .. }))
        .await;
    assert_eq!(delivery, Delivery::Connection(conn("ada")));
    let ServerEvent::AnswerResult { verdict } = event else {
        unreachable!()
    };
    assert_eq!(verdict.points, 10.0);
    assert_eq!(verdict.total_points, 12.0);
}

// =========================================================================
// Leave and disconnect handling
// =========================================================================

#[tokio::test(start_paused = true)]
async fn host_leaving_before_start_closes_and_refunds() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 10).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.leave(uid("host")).await.unwrap();

    let (delivery, _) = h
        .wait_for(|e| matches!(e, ServerEvent::RoomClosed { .. }))
        .await;
    assert_eq!(delivery, Delivery::Room(code));

    h.wait_room_count(0).await;
    let state = h.ledger.state();
    assert!(state.refunds.contains(&(uid("ada"), 10)));
    assert!(state.refunds.contains(&(uid("bob"), 10)));
}

#[tokio::test(start_paused = true)]
async fn sole_survivor_wins_and_room_is_torn_down() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::GameCanStart)).await;

    handle.leave(uid("bob")).await.unwrap();

    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::GameFinished { .. }))
        .await;
    let ServerEvent::GameFinished { summary } = event else {
        unreachable!()
    };
    assert_eq!(summary.winners, vec!["ada".to_string()]);

    // Room and countdown die together with the actor.
    h.wait_room_count(0).await;
    assert!(handle.info().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn host_leaving_mid_game_force_ends_without_winners() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 10).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::GameCanStart)).await;

    handle.leave(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::RoomClosed { .. }))
        .await;
    h.wait_room_count(0).await;

    // Fees are committed to the pot: no refunds, no settlement credits.
    let state = h.ledger.state();
    assert!(state.refunds.is_empty());
    assert!(state.credits.is_empty());
}

#[tokio::test(start_paused = true)]
async fn mid_game_kick_counts_as_a_departure() {
    let mut h = harness();
    let code = setup_room(&mut h, choice_quiz(), 0).await;
    let handle = h.registry.room(&code).unwrap().clone();

    handle.start(uid("host")).await.unwrap();
    h.wait_for(|e| matches!(e, ServerEvent::GameCanStart)).await;

    // Kicking ada drops actives to one: bob wins by survival.
    handle.kick(uid("host"), "ada".into()).await.unwrap();
    let (_, event) = h
        .wait_for(|e| matches!(e, ServerEvent::GameFinished { .. }))
        .await;
    let ServerEvent::GameFinished { summary } = event else {
        unreachable!()
    };
    assert_eq!(summary.winners, vec!["bob".to_string()]);
    h.wait_room_count(0).await;
}
