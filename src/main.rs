mod cli;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use log::error;

use cfg_ll1::render::{self, TextSink};
use cfg_ll1::report::{Event, Tee};
use cfg_ll1::{candidate_lines, load_grammar, Analysis, Error, Summary};

use crate::cli::Cli;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!(
                "{}",
                render::describe(&Event::Summary {
                    lines: summary.lines,
                    failed: summary.failed,
                })
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Summary, Error> {
    let grammar_text = fs::read_to_string(&cli.grammar).map_err(|err| Error::io(&cli.grammar, err))?;
    let input_text = fs::read_to_string(&cli.input).map_err(|err| Error::io(&cli.input, err))?;
    let output = File::create(&cli.output).map_err(|err| Error::io(&cli.output, err))?;

    let grammar = load_grammar(&grammar_text).map_err(|source| Error::Grammar {
        path: cli.grammar.clone(),
        source,
    })?;

    let console = if cli.quiet {
        None
    } else {
        Some(TextSink::new(io::stdout()))
    };
    let mut sink = Tee(TextSink::new(BufWriter::new(output)), console);
    let analysis = Analysis::new(&grammar, &mut sink).map_err(|source| Error::Grammar {
        path: cli.grammar.clone(),
        source,
    })?;
    let summary = analysis.parse_lines(candidate_lines(&input_text), cli.policy(), &mut sink);

    let Tee(report, _) = sink;
    let write_failed = report.has_failed();
    let result = report.into_inner().flush();
    if write_failed {
        return Err(Error::io(
            &cli.output,
            io::Error::new(io::ErrorKind::Other, "writing the report failed"),
        ));
    }
    result.map_err(|err| Error::io(&cli.output, err))?;
    Ok(summary)
}
