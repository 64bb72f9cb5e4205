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

use std::env;
use std::io::{self, Write};
use std::process;

use argparse::{ArgumentParser, Store, StoreOption};
use incident_arm::{MiningConfig, Strategy};

pub struct Arguments {
    pub input_file_path: String,
    pub output_rules_path: String,
    pub max_records: Option<usize>,
    pub config: MiningConfig,
}

// Help goes to stderr right before exiting; a failed write is ignored.
fn print_usage(parser: &ArgumentParser, out: &mut dyn Write) {
    let _ = parser.print_help("Usage:", out);
}

pub fn parse_args_or_exit() -> Arguments {
    let mut input_file_path = String::new();
    let mut output_rules_path = String::new();
    let mut strategy = String::from("level-wise");
    let mut min_support: Option<f64> = None;
    let mut min_confidence: Option<f64> = None;
    let mut min_lift: Option<f64> = None;
    let mut max_length: Option<usize> = None;
    let mut top_n: Option<usize> = None;
    let mut max_candidates: Option<usize> = None;
    let mut max_records: Option<usize> = None;

    {
        let mut parser = ArgumentParser::new();
        parser.set_description(
            "Mines association rules between incident categories reported in \
             the same precinct within the same hour.",
        );

        parser
            .refer(&mut input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Incident records in CSV format, with columns incident_date, \
                 incident_time, precinct_id and complaint_type.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut output_rules_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store output rules. \
                 Format: antecedent -> consequent, confidence, lift, support.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut strategy)
            .add_option(
                &["--strategy"],
                Store,
                "Mining strategy: 'level-wise' for itemsets up to --max-length \
                 items, or 'pairwise' for fast pairwise rules over many \
                 categories. Default: level-wise.",
            )
            .metavar("strategy");

        parser
            .refer(&mut min_support)
            .add_option(
                &["--min-support"],
                StoreOption,
                "Minimum itemset support threshold, in range (0,1]. \
                 Default: 0.01 level-wise, 0.001 pairwise.",
            )
            .metavar("threshold");

        parser
            .refer(&mut min_confidence)
            .add_option(
                &["--min-confidence"],
                StoreOption,
                "Minimum rule confidence threshold, in range (0,1]. \
                 Default: 0.5 level-wise, 0.01 pairwise.",
            )
            .metavar("threshold");

        parser
            .refer(&mut min_lift)
            .add_option(
                &["--min-lift"],
                StoreOption,
                "Minimum rule lift threshold, in range [0,∞].",
            )
            .metavar("threshold");

        parser
            .refer(&mut max_length)
            .add_option(
                &["--max-length"],
                StoreOption,
                "Largest itemset to search for, level-wise only. Default: 4.",
            )
            .metavar("items");

        parser
            .refer(&mut top_n)
            .add_option(
                &["--top-n"],
                StoreOption,
                "Pairwise only: mine just the N most frequent categories. \
                 Rarer categories never appear in a rule, even if they would \
                 meet --min-support. Default: 50.",
            )
            .metavar("categories");

        parser
            .refer(&mut max_candidates)
            .add_option(
                &["--max-candidates"],
                StoreOption,
                "Level-wise only: abort if a level generates more candidate \
                 itemsets than this.",
            )
            .metavar("count");

        parser
            .refer(&mut max_records)
            .add_option(
                &["--max-records"],
                StoreOption,
                "Read at most this many valid records from the input.",
            )
            .metavar("count");

        if env::args().count() == 1 {
            print_usage(&parser, &mut io::stderr());
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    let strategy: Strategy = match strategy.parse() {
        Ok(strategy) => strategy,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut config = MiningConfig::for_strategy(strategy);
    if let Some(min_support) = min_support {
        config.min_support = min_support;
    }
    if let Some(min_confidence) = min_confidence {
        config.min_confidence = min_confidence;
    }
    if min_lift.is_some() {
        config.min_lift = min_lift;
    }
    if let Some(max_length) = max_length {
        config.max_length = max_length;
    }
    if top_n.is_some() {
        config.top_n_categories = top_n;
    }
    config.max_candidates = max_candidates;

    if let Err(err) = config.validate() {
        eprintln!("{}", err);
        process::exit(1);
    }

    Arguments {
        input_file_path,
        output_rules_path,
        max_records,
        config,
    }
}
