//! Command implementations for the CLI.

use std::sync::Arc;

use log::info;

use crate::analysis::analyzer::Analyzer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::skos::config::{EngineConfig, parse_relations};
use crate::skos::engine::{EngineBuilder, SkosEngine};
use crate::skos::jsonl::JsonlVocabulary;
use crate::skos::store::ConceptStore;

/// Execute a CLI command.
pub fn execute_command(args: SkosArgs) -> Result<()> {
    match &args.command {
        Command::Expand(expand_args) => expand(expand_args.clone(), &args),
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args),
        Command::Lookup(lookup_args) => lookup(lookup_args.clone(), &args),
    }
}

/// Turn the command line options into an engine configuration.
pub fn engine_config(args: &EngineArgs) -> Result<EngineConfig> {
    let languages = args.languages.as_ref().map(|languages| {
        languages
            .split(',')
            .map(str::trim)
            .filter(|language| !language.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    Ok(EngineConfig {
        mode: args.mode.parse()?,
        max_depth: args.depth,
        relations: parse_relations(&args.relations)?,
        depth_origin: args.depth_origin.parse()?,
        languages: languages.filter(|languages| !languages.is_empty()),
        cache_dir: args.cache_dir.clone(),
    })
}

fn build_engine(args: &EngineArgs) -> Result<Arc<SkosEngine>> {
    let config = engine_config(args)?;
    let vocabulary = JsonlVocabulary::new(&args.vocabulary);
    let engine = EngineBuilder::from_config(config).build(&vocabulary)?;

    let report = engine.store().report();
    info!(
        "Loaded {} concepts ({} statements applied, {} skipped)",
        engine.store().len(),
        report.applied,
        report.skipped()
    );
    Ok(engine)
}

/// Expand a single term.
fn expand(args: ExpandArgs, cli_args: &SkosArgs) -> Result<()> {
    let engine = build_engine(&args.engine)?;
    let config = engine.config();

    let result = ExpansionResult {
        term: args.term.clone(),
        mode: config.mode.to_string(),
        max_depth: config.max_depth,
        expansions: engine.expand(&args.term),
    };

    output_result(
        &format!("Expansions of '{}' ({} mode, depth {})", args.term, config.mode, config.max_depth),
        &result,
        cli_args,
    )
}

/// Run text through the analyzer chain.
fn analyze(args: AnalyzeArgs, cli_args: &SkosArgs) -> Result<()> {
    let engine = build_engine(&args.engine)?;
    let analyzer = engine.analyzer();

    let result = AnalysisResult {
        analyzer: analyzer.name().to_string(),
        tokens: analyzer.analyze(&args.text)?.collect(),
    };

    output_result(
        &format!("Token stream from {}", analyzer.name()),
        &result,
        cli_args,
    )
}

/// Look up concepts by label or URI.
fn lookup(args: LookupArgs, cli_args: &SkosArgs) -> Result<()> {
    let store = ConceptStore::load(&JsonlVocabulary::new(&args.vocabulary))?;

    let concepts = if args.by_id {
        store.lookup_by_id(&args.term).into_iter().collect::<Vec<_>>()
    } else {
        store
            .lookup_by_label(&args.term)
            .into_iter()
            .filter_map(|id| store.lookup_by_id(id))
            .collect()
    };

    let result = LookupResult {
        term: args.term.clone(),
        concepts: concepts
            .into_iter()
            .map(|concept| ConceptSummary::from_concept(&store, concept))
            .collect(),
        report: store.report().clone(),
    };

    output_result(&format!("Concepts matching '{}'", args.term), &result, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skos::concept::RelationKind;
    use crate::skos::config::ExpansionMode;
    use clap::Parser;

    fn engine_args(extra: &[&str]) -> EngineArgs {
        let mut argv = vec!["skos-analysis", "expand", "vocab.jsonl", "term"];
        argv.extend_from_slice(extra);
        match SkosArgs::try_parse_from(argv).unwrap().command {
            Command::Expand(expand) => expand.engine,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_engine_config_from_args() {
        let config = engine_config(&engine_args(&[
            "--mode",
            "uri",
            "--depth",
            "2",
            "--relations",
            "narrower,related",
            "--languages",
            "en, de",
        ]))
        .unwrap();

        assert_eq!(config.mode, ExpansionMode::Uri);
        assert_eq!(config.max_depth, 2);
        assert_eq!(
            config.relations,
            [RelationKind::Narrower, RelationKind::Related].into_iter().collect()
        );
        assert_eq!(
            config.languages,
            Some(vec!["en".to_string(), "de".to_string()])
        );
    }

    #[test]
    fn test_bad_options_are_configuration_errors() {
        let err = engine_config(&engine_args(&["--mode", "graph"])).unwrap_err();
        assert!(err.is_configuration());

        let err = engine_config(&engine_args(&["--relations", "cousin"])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_vocabulary_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = engine_args(&[]);
        args.vocabulary = dir.path().join("missing.jsonl");

        assert!(build_engine(&args).unwrap_err().is_load());
    }
}
