use lane_defence_core::{Banner, Command, EconomySnapshot, Outcome};
use lane_defence_system_status::StatusEvaluator;

fn economy(score: u32) -> EconomySnapshot {
    EconomySnapshot {
        resources: 120,
        score,
        frame: 42,
    }
}

#[test]
fn victory_needs_score_and_a_clear_field() {
    let evaluator = StatusEvaluator::new(10);
    let mut commands = Vec::new();

    let _ = evaluator.handle(economy(9), 0, None, &mut commands);
    let _ = evaluator.handle(economy(10), 1, None, &mut commands);
    assert!(commands.is_empty());

    let report = evaluator.handle(economy(10), 0, None, &mut commands);
    assert_eq!(commands, vec![Command::DeclareVictory]);
    assert_eq!((report.score, report.resources, report.frame), (10, 120, 42));
    assert!(!report.is_terminal());
}

#[test]
fn latched_outcomes_are_reported_without_new_commands() {
    let evaluator = StatusEvaluator::new(10);
    let mut commands = Vec::new();

    let lost = evaluator.handle(economy(30), 0, Some(Outcome::Lost), &mut commands);
    assert!(commands.is_empty());
    assert_eq!(lost.banner(), Some(Banner::GameOver));
    assert!(lost.is_terminal());

    let won = evaluator.handle(economy(30), 0, Some(Outcome::Won), &mut commands);
    assert!(commands.is_empty());
    assert_eq!(won.banner(), Some(Banner::LevelCompleted { score: 30 }));
}
