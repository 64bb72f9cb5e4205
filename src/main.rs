// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod command_line_args;

use command_line_args::{parse_args_or_exit, Arguments};
use incident_arm::{mine, BasketSet, Frequent, IncidentReader, MiningError, MiningOutcome};

use std::process;
use std::time::Instant;

fn write_rules(
    path: &str,
    outcome: &MiningOutcome,
    baskets: &BasketSet,
) -> Result<(), MiningError> {
    let mut output = csv::Writer::from_path(path)?;
    output.write_record(&["Antecedent->Consequent", "Confidence", "Lift", "Support"])?;
    for rule in &outcome.rules {
        output.write_record(&[
            rule.describe(baskets.itemizer()),
            rule.confidence.to_string(),
            rule.lift.to_string(),
            rule.support.to_string(),
        ])?;
    }
    output.flush()?;
    Ok(())
}

fn mine_incidents(args: &Arguments) -> Result<(), MiningError> {
    log::info!("Mining data set: {}", args.input_file_path);
    let start = Instant::now();

    log::info!("Reading incidents and building baskets...");
    let timer = Instant::now();
    let mut reader =
        IncidentReader::from_path(&args.input_file_path)?.with_max_records(args.max_records);
    let records = reader.by_ref().collect::<Result<Vec<_>, MiningError>>()?;
    log::info!(
        "Read {} records, skipped {} incomplete rows.",
        reader.read(),
        reader.skipped()
    );
    let baskets = BasketSet::build(records);
    log::info!(
        "Built {} baskets from {} records ({} dropped) in {} seconds.",
        baskets.len(),
        baskets.num_records(),
        baskets.skipped_records(),
        timer.elapsed().as_secs()
    );

    log::info!(
        "Running {} mining (min support {}, min confidence {})...",
        args.config.strategy,
        args.config.min_support,
        args.config.min_confidence
    );
    let timer = Instant::now();
    let outcome = mine(&baskets, &args.config)?;
    log::info!(
        "Discovered {} rules in {} seconds.",
        outcome.rules.len(),
        timer.elapsed().as_secs()
    );
    for rule in outcome.rules.iter().take(5) {
        log::info!(
            "  {} (confidence {:.3}, lift {:.3}, support {:.4})",
            rule.describe(baskets.itemizer()),
            rule.confidence,
            rule.lift,
            rule.support
        );
    }
    if let Frequent::Itemsets(itemsets) = &outcome.frequent {
        for length in 1..=args.config.max_length {
            let count = itemsets.of_length(length).len();
            if count > 0 {
                log::debug!("{} frequent {}-itemsets", count, length);
            }
        }
    }

    write_rules(&args.output_rules_path, &outcome, &baskets)?;
    log::info!("Wrote rules to {}", args.output_rules_path);

    log::info!("Total runtime: {} seconds", start.elapsed().as_secs());

    Ok(())
}

fn main() {
    pretty_env_logger::init();

    let arguments = parse_args_or_exit();

    if let Err(err) = mine_incidents(&arguments) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
