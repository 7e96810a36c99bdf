// End-to-end sessions against the engine alone: events in, effects out.

use assert_matches::assert_matches;
use homerow::effects::{Cue, Deferred, DeferredAction, Effect, Vfx};
use homerow::game::{Game, GameEvent, GameState};
use homerow::language::Sentence;
use homerow::mode::Mode;
use homerow::sequencer::Key;

fn start(mode: Mode, seed: u64) -> Game {
    let mut game = Game::with_seed(mode, seed);
    assert_eq!(game.handle(GameEvent::Start), vec![Effect::Sound(Cue::Start)]);
    game
}

fn next_target(game: &mut Game) {
    let task = Deferred {
        generation: game.generation(),
        action: DeferredAction::NextTarget,
    };
    game.handle(GameEvent::Deferred(task));
}

fn type_text(game: &mut Game, text: &str) -> Vec<Effect> {
    text.chars()
        .flat_map(|c| game.handle(GameEvent::Key(Key::Char(c))))
        .collect()
}

#[test]
fn beginner_ten_correct_presses_reach_level_two() {
    let mut game = start(Mode::Beginner, 1);

    for press in 1..=10u32 {
        let target = game.session().target.key().unwrap();
        let effects = game.handle(GameEvent::Key(Key::Char(target)));
        assert!(effects.contains(&Effect::Vfx(Vfx::KeyPress {
            key: Key::Char(target),
            correct: true
        })));
        if press < 10 {
            assert_eq!(game.session().level(), 1);
        }
        next_target(&mut game);
    }

    assert_eq!(game.session().level(), 2);
    assert_eq!(game.session().score(), 100);

    // the next press scores at the new level
    let target = game.session().target.key().unwrap();
    game.handle(GameEvent::Key(Key::Char(target)));
    assert_eq!(game.session().score(), 120);
}

#[test]
fn beginner_backspace_counts_as_a_miss() {
    let mut game = start(Mode::Beginner, 1);
    let effects = game.handle(GameEvent::Key(Key::Backspace));
    assert!(effects.contains(&Effect::Sound(Cue::Incorrect)));
    assert_eq!(game.session().card.total_count, 1);
    assert_eq!(game.session().card.accuracy(), 0);
}

#[test]
fn advanced_word_scores_eight() {
    let mut game = start(Mode::Advanced, 2);
    game.load_sentence(Sentence::from_text("cat naps"));
    type_text(&mut game, "cat ");

    assert_eq!(game.session().score(), 8);
    assert_eq!(game.session().card.words_completed, 1);
}

#[test]
fn medium_word_scores_double() {
    let mut game = start(Mode::Medium, 2);
    game.load_sentence(Sentence::from_text("cat naps"));
    type_text(&mut game, "cat ");

    assert_eq!(game.session().score(), 16);
    assert_eq!(game.session().card.words_completed, 1);
}

#[test]
fn mismatch_with_comma_resets_buffer_only() {
    let mut game = start(Mode::Advanced, 2);
    game.load_sentence(Sentence::from_text("cat naps"));
    let effects = type_text(&mut game, "cats,");

    assert!(effects.contains(&Effect::Sound(Cue::Incorrect)));
    assert_eq!(game.session().score(), 0);
    let seq = game.session().target.words().unwrap();
    assert_eq!(seq.buffer(), "");
    assert_eq!(seq.current_word(), Some("cat"));
}

#[test]
fn advanced_clock_runs_exactly_one_hundred_ticks() {
    let mut game = start(Mode::Advanced, 3);
    let mut ticks = 0;
    let mut last = game.session().time_left();

    while game.is_playing() {
        game.handle(GameEvent::Tick);
        ticks += 1;
        let now = game.session().time_left();
        assert!((last - now - 0.1).abs() < 1e-9 || now == 0.0);
        last = now;
    }

    assert_eq!(ticks, 100);
    assert_eq!(game.session().time_left(), 0.0);
}

#[test]
fn generated_sentences_can_be_typed_through() {
    let mut game = start(Mode::Advanced, 8);

    for _ in 0..3 {
        let words: Vec<String> = game.session().target.words().unwrap().sentence().words.clone();
        let last = words.len() - 1;
        for (i, word) in words.iter().enumerate() {
            let typed: String = word
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect();
            type_text(&mut game, &typed);
            if i < last {
                type_text(&mut game, " ");
            }
        }
    }

    assert_eq!(game.session().card.sentences_completed, 3);
    assert_eq!(game.session().level(), 4);
    assert_eq!(game.session().card.accuracy(), 100);
    // every level-up granted the words' bonus on top of the 10s budget
    assert!(game.session().time_left() > 10.0);
}

#[test]
fn restart_is_idempotent() {
    let mut game = start(Mode::Medium, 4);
    game.load_sentence(Sentence::from_text("Dad asks"));
    type_text(&mut game, "dad asks");
    while game.is_playing() {
        game.handle(GameEvent::Tick);
    }
    let ended_generation = game.generation();

    game.handle(GameEvent::Restart);
    game.handle(GameEvent::Restart);

    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.generation(), ended_generation + 1);
    let session = game.session();
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.time_left(), 20.0);
    assert_eq!(session.card.words_completed, 0);
}

#[test]
fn result_carries_final_numbers() {
    let mut game = start(Mode::Advanced, 6);
    game.load_sentence(Sentence::from_text("cat naps"));
    type_text(&mut game, "cat ");
    game.handle(GameEvent::Key(Key::Char('x')));
    game.handle(GameEvent::Key(Key::Char(' ')));

    let mut end = Vec::new();
    while game.is_playing() {
        end = game.handle(GameEvent::Tick);
    }

    assert_matches!(end.as_slice(), [Effect::Sound(Cue::GameOver), Effect::Persist(result)] => {
        assert_eq!(result.score, 8);
        assert_eq!(result.level, 1);
        // word modes never count key presses
        assert_eq!(result.accuracy, 100);
        // one word in ten seconds
        assert_eq!(result.wpm, Some(6));
    });
}
