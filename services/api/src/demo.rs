use catfolio::config::GameConfig;
use catfolio::error::AppError;
use catfolio::games::roster::standard_roster;
use catfolio::games::scam_cat::{
    PromptCatalog, QuizPhase, ScamCatRules, ScamCatSession, Verdict,
};
use catfolio::games::spending_sorter::{
    Bucket, Classification, ItemCatalog, SpendingSorterRules, SpendingSorterSession,
};
use catfolio::games::{fork_rng, game_rng, GameRng};
use chrono::Local;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for reproducible item draws and prompt shuffles.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Skip the Scam Cat portion of the demo.
    #[arg(long)]
    pub(crate) skip_quiz: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, skip_quiz } = args;
    let config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    let mut root = game_rng(config.seed);

    println!(
        "Catfolio minigame demo ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    match seed {
        Some(seed) => println!("- seed {seed}"),
        None => println!("- unseeded; pass --seed to replay this run"),
    }

    println!("\nCats on the menu");
    for cat in standard_roster() {
        let card = cat.card();
        println!(
            "  - {} ({}) -> {}{}",
            cat.name,
            card.kind_label,
            cat.minigame.slug(),
            if card.playable { "" } else { " [coming soon]" }
        );
    }

    demo_spending_sorter(config.spending_sorter.clone(), fork_rng(&mut root))?;
    if !skip_quiz {
        demo_scam_cat(config.scam_cat.clone(), fork_rng(&mut root))?;
    }
    Ok(())
}

/// Sorts every item into its true bucket, except that it skips wants once the
/// wants target is covered.
fn demo_spending_sorter(rules: SpendingSorterRules, mut rng: GameRng) -> Result<(), AppError> {
    let mut session =
        SpendingSorterSession::new(Arc::new(ItemCatalog::standard()), rules, &mut rng)?;
    if let Err(err) = session.start(&mut rng) {
        println!("  Spending Sorter unavailable: {err}");
        return Ok(());
    }

    let targets = session.targets();
    println!("\nSpending Sorter");
    println!(
        "- budget ${} | targets needs ${} / wants ${} / savings ${}",
        session.starting_budget(),
        targets.needs,
        targets.wants,
        targets.savings
    );

    for item in session.pending().to_vec() {
        let category = item.template.category;
        let bucket = if category.bucket() == Bucket::Wants
            && session.ledger().wants.money >= targets.wants
        {
            Bucket::Ignore
        } else {
            category.bucket()
        };

        let outcome = match session.classify(item.id, bucket) {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("  Classification rejected: {err}");
                continue;
            }
        };
        let note = match outcome {
            Classification::Ignored => "ignored".to_string(),
            Classification::Correct { points } => format!("+{points} pts"),
            Classification::Misplaced { expected, penalty } => {
                format!("-{penalty} pts (belongs in {})", expected.label())
            }
        };
        println!(
            "  {} {} ${} -> {} ({note})",
            item.template.icon,
            item.template.name,
            item.template.cost,
            bucket.label()
        );
    }

    let view = session.view();
    for bucket in &view.buckets {
        println!(
            "- {}: ${} across {} item(s) = {}% of budget (target {}%)",
            bucket.label, bucket.money, bucket.item_count, bucket.share_percent, bucket.target_percent
        );
    }

    match session.finish() {
        Ok(report) => println!(
            "Result: {} | score {} | {}",
            report.verdict.label(),
            view.score,
            report.summary()
        ),
        Err(err) => println!("  Unable to finish: {err}"),
    }
    Ok(())
}

/// Answers correctly except for the very first prompt, so the demo shows a lost
/// round before the clean one.
fn demo_scam_cat(rules: ScamCatRules, mut rng: GameRng) -> Result<(), AppError> {
    let mut session = ScamCatSession::new(Arc::new(PromptCatalog::standard()), rules)?;
    let mut fumbled = false;

    println!("\nScam Cat");
    while !session.phase().is_terminal() {
        println!("[{}]", session.start_label());
        if let Err(err) = session.start_round(&mut rng) {
            println!("  Round rejected: {err}");
            return Ok(());
        }

        while session.phase() == QuizPhase::Playing {
            let Some(prompt) = session.current_prompt().copied() else {
                break;
            };
            let truth = Verdict::from_is_scam(prompt.is_scam);
            let answer = if fumbled {
                truth
            } else {
                fumbled = true;
                match truth {
                    Verdict::Scam => Verdict::Safe,
                    Verdict::Safe => Verdict::Scam,
                }
            };

            let feedback = match session.submit(Some(answer)) {
                Ok(feedback) => feedback,
                Err(err) => {
                    println!("  Answer rejected: {err}");
                    return Ok(());
                }
            };
            println!("  \"{}\"", prompt.text);
            println!(
                "    answered {} -> {} {}",
                answer.label(),
                feedback.headline(),
                feedback.explanation
            );

            if let Err(err) = settle(&mut session) {
                println!("  Timer step rejected: {err}");
                return Ok(());
            }
        }
        println!(
            "  progress {}% | attempts left {}",
            session.progress_percent(),
            session.attempts()
        );
    }

    println!("Result: {}", session.phase().label());
    Ok(())
}

/// Plays out the feedback and card-exit steps without waiting on a clock.
fn settle(session: &mut ScamCatSession) -> Result<(), catfolio::games::scam_cat::ScamCatError> {
    let phase = session.complete_feedback(session.ticket())?;
    if phase == QuizPhase::Transitioning {
        session.complete_transition(session.ticket())?;
    }
    Ok(())
}
