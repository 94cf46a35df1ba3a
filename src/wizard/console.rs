// Line-based terminal driver for the wizard

use super::state::{Outcome, Step, Transition, Wizard};
use crate::config::Config;
use crate::error::Result;
use crate::fuel::parse_measurement;
use crate::present::{category_name, format_figure, format_summary, powertrain_name, share_text};
use crate::vehicle::models::{Category, Powertrain};
use std::io::{BufRead, Write};

enum Command {
    Apply(Vec<Transition>),
    Quit,
    Invalid(String),
}

/// Drive the wizard from `input` until the user quits or input ends.
/// Returns the last calculated outcome, if any.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
) -> Result<Option<Outcome>> {
    let mut wizard = Wizard::new(config);
    let mut last_outcome = None;
    let mut lines = input.lines();

    loop {
        write_prompt(output, &wizard, config)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let transitions = match parse_command(line.trim(), &wizard) {
            Command::Quit => break,
            Command::Invalid(message) => {
                writeln!(output, "! {}", message)?;
                continue;
            }
            Command::Apply(transitions) => transitions,
        };

        // A compound entry either applies fully or not at all
        let mut next = wizard.clone();
        let mut failed = false;
        for transition in transitions {
            match next.apply(transition, config) {
                Ok(state) => next = state,
                Err(e) => {
                    writeln!(output, "! {}", e)?;
                    failed = true;
                    break;
                }
            }
        }
        if failed {
            continue;
        }

        wizard = next;
        if let Some(outcome) = wizard.outcome() {
            if wizard.step() == Step::Result {
                write_outcome(output, outcome, config)?;
                last_outcome = Some(outcome.clone());
            }
        }
    }

    Ok(last_outcome)
}

fn parse_command(line: &str, wizard: &Wizard) -> Command {
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Command::Quit,
        "b" | "back" => return Command::Apply(vec![Transition::Back]),
        "r" | "reset" => return Command::Apply(vec![Transition::Reset]),
        _ => {}
    }

    match wizard.step() {
        Step::Intro => Command::Apply(vec![Transition::Start]),
        Step::Category => pick(line, &Category::ALL)
            .map(|category| Command::Apply(vec![Transition::SelectCategory { category }]))
            .unwrap_or_else(|| Command::Invalid(format!("Unknown category '{}'", line))),
        Step::Powertrain => pick(line, &Powertrain::ALL)
            .map(|powertrain| Command::Apply(vec![Transition::SelectPowertrain { powertrain }]))
            .unwrap_or_else(|| Command::Invalid(format!("Unknown powertrain '{}'", line))),
        Step::Weight => match line.parse::<f64>() {
            Ok(weight) => Command::Apply(vec![Transition::EnterWeight { weight }]),
            Err(_) => Command::Invalid(format!("'{}' is not a weight in kg", line)),
        },
        Step::Measurement => match parse_measurement(line) {
            Some((value, unit)) => {
                let mut transitions = Vec::new();
                if let Some(unit) = unit {
                    transitions.push(Transition::SelectUnit { unit });
                }
                transitions.push(Transition::EnterMeasurement { value });
                transitions.push(Transition::Calculate);
                Command::Apply(transitions)
            }
            None => Command::Invalid(format!("'{}' is not a fuel economy figure", line)),
        },
        Step::Result => {
            Command::Invalid("Enter r to start over, b to go back or q to quit".to_string())
        }
    }
}

/// Accept a 1-based menu number or the option's tag
fn pick<T: Copy + std::str::FromStr>(line: &str, options: &[T]) -> Option<T> {
    if let Ok(n) = line.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    line.parse::<T>().ok()
}

fn write_prompt<W: Write>(output: &mut W, wizard: &Wizard, config: &Config) -> Result<()> {
    match wizard.step() {
        Step::Intro => {
            writeln!(output, "2030年度燃費基準 達成率チェック")?;
            write!(output, "Press Enter to start (q to quit): ")?;
        }
        Step::Category => {
            writeln!(output, "Vehicle category:")?;
            for (i, category) in Category::ALL.iter().enumerate() {
                writeln!(output, "  {}. {} ({})", i + 1, category_name(*category), category)?;
            }
            write!(output, "> ")?;
        }
        Step::Powertrain => {
            writeln!(output, "Powertrain:")?;
            for (i, powertrain) in Powertrain::ALL.iter().enumerate() {
                writeln!(
                    output,
                    "  {}. {} ({})",
                    i + 1,
                    powertrain_name(*powertrain),
                    powertrain
                )?;
            }
            write!(output, "> ")?;
        }
        Step::Weight => {
            write!(
                output,
                "Vehicle weight in kg ({}-{}): ",
                config.limits.weight_min, config.limits.weight_max
            )?;
        }
        Step::Measurement => {
            if let Some(preview) = wizard.converted_preview() {
                writeln!(output, "  = {} km/L (WLTC)", format_figure(preview))?;
            }
            write!(
                output,
                "Fuel economy in km/L [{}] (add jc08 or 10・15 for legacy figures): ",
                wizard.unit()
            )?;
        }
        Step::Result => {
            write!(output, "r to start over, b to go back, q to quit: ")?;
        }
    }
    Ok(())
}

fn write_outcome<W: Write>(output: &mut W, outcome: &Outcome, config: &Config) -> Result<()> {
    if outcome.validation.has_issues() {
        write!(output, "{}", outcome.validation)?;
    }
    writeln!(output)?;
    writeln!(
        output,
        "{}",
        format_summary(&outcome.result, &outcome.profile, &outcome.measurement)
    )?;
    writeln!(output)?;
    writeln!(output, "Share:")?;
    writeln!(
        output,
        "{}",
        share_text(&outcome.result, outcome.profile.category, &config.share)
    )?;
    writeln!(output)?;
    Ok(())
}
