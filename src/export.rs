//! Cypher export: serialize relation records as Cypher statements.
//!
//! Produces a script that loads the headword graph into Neo4j or any
//! Cypher-compatible property graph:
//!
//! ```text
//! Record { dog: [mammal|GLOSS_MENTION, canine|HYPERNYM] }
//!   → MERGE (a:Headword {lemma: 'dog'}) MERGE (b:Headword {lemma: 'mammal'})
//!     MERGE (a)-[:GLOSS_MENTION]->(b);
//! ```
//!
//! Relationship types are the link kind names, which are already valid
//! Cypher identifiers. Duplicate links collapse under MERGE.

use std::io::Write;

use crate::model::*;
use crate::Result;

/// Export records as a complete Cypher script.
pub fn export_cypher(records: &[Record], writer: &mut dyn Write) -> Result<()> {
    write_cypher_header(writer)?;
    writeln!(writer, "// Headwords: {}", records.len())?;
    writeln!(writer, "// Links: {}", records.iter().map(Record::len).sum::<usize>())?;
    writeln!(writer)?;
    for record in records {
        write_cypher_record(record, writer)?;
    }
    Ok(())
}

pub fn write_cypher_header(writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "// wordnet-linker Cypher export")?;
    writeln!(writer, "CREATE CONSTRAINT IF NOT EXISTS FOR (h:Headword) REQUIRE h.lemma IS UNIQUE;")?;
    Ok(())
}

/// One MERGE statement per link.
pub fn write_cypher_record(record: &Record, writer: &mut dyn Write) -> Result<()> {
    let source = quote(record.headword.as_str());
    for link in &record.links {
        writeln!(
            writer,
            "MERGE (a:Headword {{lemma: {}}}) MERGE (b:Headword {{lemma: {}}}) MERGE (a)-[:{}]->(b);",
            source,
            quote(&link.target),
            link.kind,
        )?;
    }
    Ok(())
}

/// Format a string as a Cypher literal.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
