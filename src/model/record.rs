//! Record: one output line per headword.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Headword, Link};

/// All links of one headword, in aggregation order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub headword: Headword,
    pub links: Vec<Link>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The value column: `target1|KIND1,target2|KIND2,...`
    pub fn links_field(&self) -> String {
        let mut out = String::new();
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&link.target);
            out.push('|');
            out.push_str(link.kind.name());
        }
        out
    }
}

/// `headword<TAB>links`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.headword, self.links_field())
    }
}
