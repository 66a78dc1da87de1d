//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenType};
use crate::cli::args::{OutputFormat, SkosArgs};
use crate::error::Result;
use crate::skos::concept::{Concept, Label, RelationKind};
use crate::skos::store::{ConceptStore, LoadReport};

/// Result structure for a single term expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub term: String,
    pub mode: String,
    pub max_depth: usize,
    pub expansions: Vec<String>,
}

/// Result structure for analyzing text.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analyzer: String,
    pub tokens: Vec<Token>,
}

/// Result structure for concept lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub term: String,
    pub concepts: Vec<ConceptSummary>,
    pub report: LoadReport,
}

/// A concept with its relations resolved to URIs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptSummary {
    pub id: String,
    pub preferred: Vec<Label>,
    pub alternate: Vec<Label>,
    pub hidden: Vec<Label>,
    pub broader: Vec<String>,
    pub narrower: Vec<String>,
    pub related: Vec<String>,
}

impl ConceptSummary {
    pub fn from_concept(store: &ConceptStore, concept: &Concept) -> Self {
        let ids = |kind: RelationKind| -> Vec<String> {
            concept
                .relations(kind)
                .iter()
                .filter_map(|&index| store.concept(index))
                .map(|target| target.id().to_string())
                .collect()
        };

        ConceptSummary {
            id: concept.id().to_string(),
            preferred: concept.preferred_labels().to_vec(),
            alternate: concept.alternate_labels().to_vec(),
            hidden: concept.hidden_labels().to_vec(),
            broader: ids(RelationKind::Broader),
            narrower: ids(RelationKind::Narrower),
            related: ids(RelationKind::Related),
        }
    }
}

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn print_human(&self);
}

impl HumanOutput for ExpansionResult {
    fn print_human(&self) {
        if self.expansions.is_empty() {
            println!("No expansions for '{}'", self.term);
            return;
        }
        for expansion in &self.expansions {
            println!("{expansion}");
        }
    }
}

impl HumanOutput for AnalysisResult {
    fn print_human(&self) {
        println!("{:<6} {:<4} {:<12} {:<10} text", "pos", "inc", "offsets", "type");
        for token in &self.tokens {
            let kind = match token.token_type {
                TokenType::Word => "word",
                TokenType::Keyword => "keyword",
                TokenType::Expansion => "expansion",
            };
            let offsets = format!("[{},{})", token.start_offset, token.end_offset);
            println!(
                "{:<6} {:<4} {:<12} {:<10} {}",
                token.position, token.position_increment, offsets, kind, token.text
            );
        }
    }
}

impl HumanOutput for LookupResult {
    fn print_human(&self) {
        if self.concepts.is_empty() {
            println!("No concepts match '{}'", self.term);
            return;
        }
        for (i, concept) in self.concepts.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", concept.id);
            print_labels("prefLabel", &concept.preferred);
            print_labels("altLabel", &concept.alternate);
            print_labels("hiddenLabel", &concept.hidden);
            print_ids("broader", &concept.broader);
            print_ids("narrower", &concept.narrower);
            print_ids("related", &concept.related);
        }
    }
}

fn print_labels(name: &str, labels: &[Label]) {
    for label in labels {
        match &label.language {
            Some(language) => println!("  {name}: {} @{language}", label.value),
            None => println!("  {name}: {}", label.value),
        }
    }
}

fn print_ids(name: &str, ids: &[String]) {
    for id in ids {
        println!("  {name}: {id}");
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SkosArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SkosArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skos::vocabulary::Vocabulary;

    #[test]
    fn test_concept_summary_resolves_relations() {
        let vocabulary = Vocabulary::new()
            .pref_label("urn:c1", "weapons", Some("en"))
            .alt_label("urn:c1", "arms", Some("en"))
            .broader("urn:c1", "urn:c0")
            .related("urn:c1", "urn:c2");
        let store = ConceptStore::load(&vocabulary).unwrap();

        let summary = ConceptSummary::from_concept(&store, store.lookup_by_id("urn:c1").unwrap());
        assert_eq!(summary.id, "urn:c1");
        assert_eq!(summary.preferred[0].value, "weapons");
        assert_eq!(summary.alternate[0].value, "arms");
        assert_eq!(summary.broader, vec!["urn:c0"]);
        assert!(summary.narrower.is_empty());
        assert_eq!(summary.related, vec!["urn:c2"]);
    }

    #[test]
    fn test_expansion_result_json() {
        let result = ExpansionResult {
            term: "weapons".to_string(),
            mode: "label".to_string(),
            max_depth: 0,
            expansions: vec!["arms".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["expansions"][0], "arms");
        assert_eq!(value["max_depth"], 0);
    }
}
