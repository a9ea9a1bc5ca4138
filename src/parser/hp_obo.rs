use std::fs;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::{HpoError, HpoResult, Ontology};

/// Child - Parent
type Connections<'a> = Vec<(&'a str, &'a str)>;

/// The relevant tags of a single `[Term]` stanza
#[derive(Debug, Default)]
struct RawTerm<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
    parents: Vec<&'a str>,
    obsolete: bool,
}

pub(crate) fn read_obo_file<P: AsRef<Path>>(filename: P, ontology: &mut Ontology) -> HpoResult<()> {
    let path = filename.as_ref().display().to_string();
    let file_content =
        fs::read_to_string(filename).map_err(|_| HpoError::CannotOpenFile(path))?;
    read_obo_str(&file_content, ontology)
}

pub(crate) fn read_obo_str(content: &str, ontology: &mut Ontology) -> HpoResult<()> {
    let mut connections: Connections = Vec::new();
    let mut obsolete: Vec<&str> = Vec::new();

    for stanza in stanzas(content) {
        let Some((header, body)) = stanza.split_first() else {
            continue;
        };
        if *header != "[Term]" {
            trace!("Ignoring stanza: {}", header);
            continue;
        }
        let raw_term = term_from_obo(body);
        let (Some(id), Some(name)) = (raw_term.id, raw_term.name) else {
            warn!("Unable to parse: {}", body.join(" | "));
            continue;
        };
        if !ontology.insert_term(name.to_string(), id) {
            warn!("Duplicate term {}, keeping the first definition", id);
            continue;
        }
        if raw_term.obsolete {
            obsolete.push(id);
        }
        connections.extend(raw_term.parents.into_iter().map(|parent| (id, parent)));
    }

    for id in obsolete {
        ontology.set_obsolete(id)?;
    }

    for (child, parent) in connections {
        ontology
            .add_parent(parent, child)
            .map_err(|err| match err {
                HpoError::DoesNotExist => HpoError::InvalidInput(format!(
                    "{child} is_a {parent}, but {parent} is not defined"
                )),
                err => err,
            })?;
    }

    debug!("Parsed {} terms from OBO data", ontology.len());
    Ok(())
}

/// Splits the OBO content into blank-line separated stanzas
fn stanzas(content: &str) -> Vec<Vec<&str>> {
    let mut res = Vec::new();
    let mut current = Vec::new();
    for line in content.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {
                res.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        res.push(current);
    }
    res
}

fn term_from_obo<'a>(lines: &[&'a str]) -> RawTerm<'a> {
    let mut term = RawTerm::default();
    for &line in lines {
        match line.split_once(": ") {
            Some(("id", value)) => term.id = Some(value.trim()),
            Some(("name", value)) => term.name = Some(value.trim()),
            Some(("is_a", value)) => {
                // is_a: HP:0000118 ! Phenotypic abnormality
                if let Some(parent) = value.split_whitespace().next() {
                    term.parents.push(parent);
                }
            }
            Some(("is_obsolete", value)) => term.obsolete = value.trim() == "true",
            _ => (),
        }
    }
    term
}
