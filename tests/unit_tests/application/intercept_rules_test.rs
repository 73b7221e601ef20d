use rand::SeedableRng;
use rand::rngs::StdRng;

use parley::application::services::intercept_rules::{
    INTERCEPT_RULES, JOKES, QUOTES, TRIVIA, intercept,
};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn given_rule_table_when_listed_then_order_is_fixed() {
    let names: Vec<&str> = INTERCEPT_RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec!["joke", "coin_flip", "dice_roll", "addition", "motivation", "trivia"]
    );
}

#[test]
fn given_joke_request_in_any_case_when_intercepting_then_returns_known_joke() {
    let hit = intercept("Please TELL ME A JOKE!", &mut rng()).unwrap();

    assert_eq!(hit.rule, "joke");
    assert!(JOKES.contains(&hit.reply.as_str()));
}

#[test]
fn given_many_coin_flips_when_intercepting_then_sides_are_roughly_balanced() {
    let mut rng = rng();
    let flips = 400;

    let heads = (0..flips)
        .map(|_| intercept("flip a coin", &mut rng).unwrap().reply)
        .inspect(|reply| assert!(reply == "Heads!" || reply == "Tails!"))
        .filter(|reply| reply == "Heads!")
        .count();

    assert!((150..=250).contains(&heads), "heads = {heads}");
}

#[test]
fn given_dice_roll_when_intercepting_then_value_is_between_one_and_six() {
    let mut rng = rng();

    for _ in 0..100 {
        let reply = intercept("roll a dice", &mut rng).unwrap().reply;
        let value: u8 = reply.strip_prefix("You rolled a ").unwrap().parse().unwrap();
        assert!((1..=6).contains(&value));
    }
}

#[test]
fn given_addition_question_when_intercepting_then_returns_sum() {
    let hit = intercept("What is 5 + 7?", &mut rng()).unwrap();

    assert_eq!(hit.rule, "addition");
    assert_eq!(hit.reply, "5 + 7 = 12");
}

#[test]
fn given_huge_operands_when_intercepting_then_falls_through() {
    let message = format!("what is {} + 1", "9".repeat(60));

    assert!(intercept(&message, &mut rng()).is_none());
}

#[test]
fn given_motivation_requests_when_intercepting_then_returns_quote() {
    for message in ["Motivate me", "please inspire me"] {
        let hit = intercept(message, &mut rng()).unwrap();
        assert_eq!(hit.rule, "motivation");
        assert!(QUOTES.contains(&hit.reply.as_str()));
    }
}

#[test]
fn given_trivia_request_when_intercepting_then_returns_fact() {
    let hit = intercept("Give me some trivia", &mut rng()).unwrap();

    assert_eq!(hit.rule, "trivia");
    assert!(TRIVIA.contains(&hit.reply.as_str()));
}

#[test]
fn given_message_matching_two_rules_when_intercepting_then_first_rule_wins() {
    let hit = intercept("tell me a joke about trivia", &mut rng()).unwrap();

    assert_eq!(hit.rule, "joke");
}

#[test]
fn given_ordinary_message_when_intercepting_then_returns_none() {
    assert!(intercept("How do lifetimes work?", &mut rng()).is_none());
}
