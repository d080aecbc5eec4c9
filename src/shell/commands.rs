use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::domain::{ConceptType, RelationId, RelationKind};

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dump { path: PathBuf },
    Read { path: PathBuf },
    NewConcept { name: String, concept_type: ConceptType },
    List,
    Relate { owner: String, kind: RelationKind, targets: Vec<String> },
    Unrelate { owner: String, relation: RelationId },
    RemoveConcept { selector: String },
    Describe { phrase: String },
    Train { word: String, depth: Option<usize> },
    Help,
}

impl Command {
    pub fn parse(argv: &[String]) -> Result<Self> {
        let Some((name, args)) = argv.split_first() else {
            bail!("commande vide");
        };

        let command = match name.to_lowercase().as_str() {
            "dump" => match args {
                [path] => Command::Dump { path: path.into() },
                _ => bail!("usage: dump <fichier>"),
            },
            "read" => match args {
                [path] => Command::Read { path: path.into() },
                _ => bail!("usage: read <fichier>"),
            },
            "newc" => match args {
                [name] => Command::NewConcept {
                    name: name.clone(),
                    concept_type: ConceptType::Untyped,
                },
                [name, concept_type] => Command::NewConcept {
                    name: name.clone(),
                    concept_type: concept_type.parse()?,
                },
                _ => bail!("usage: newc <nom> [type]"),
            },
            "lsc" => Command::List,
            "relate" => match args {
                [owner, kind, targets @ ..] if !targets.is_empty() => Command::Relate {
                    owner: owner.clone(),
                    kind: kind.parse()?,
                    targets: targets.to_vec(),
                },
                _ => bail!("usage: relate <concept> <relation> <concept1> [concept2] ... [conceptN]"),
            },
            "unrelate" => match args {
                [owner, relation] => Command::Unrelate {
                    owner: owner.clone(),
                    relation: relation
                        .parse()
                        .with_context(|| format!("identifiant de relation invalide: {relation}"))?,
                },
                _ => bail!("usage: unrelate <concept> <id de relation>"),
            },
            "rmc" => match args {
                [selector] => Command::RemoveConcept {
                    selector: selector.clone(),
                },
                _ => bail!("usage: rmc <concept>"),
            },
            "describe" => {
                if args.is_empty() {
                    bail!("usage: describe <phrase>");
                }
                Command::Describe {
                    phrase: args.join(" "),
                }
            }
            "train" => match args {
                [word] => Command::Train {
                    word: word.clone(),
                    depth: None,
                },
                [word, depth] => Command::Train {
                    word: word.clone(),
                    depth: Some(
                        depth
                            .parse()
                            .with_context(|| format!("profondeur invalide: {depth}"))?,
                    ),
                },
                _ => bail!("usage: train <mot> [profondeur]"),
            },
            "help" => Command::Help,
            other => return Err(anyhow!("commande inconnue: {other}")),
        };
        Ok(command)
    }
}

pub fn help_text() -> String {
    let mut lines = vec![
        "dump <fichier>                       écrit l'instantané".to_string(),
        "read <fichier>                       charge un instantané".to_string(),
        "newc <nom> [type]                    crée un concept".to_string(),
        "lsc                                  liste les concepts".to_string(),
        "relate <concept> <relation> <cibles> ajoute une relation".to_string(),
        "unrelate <concept> <id>              retire une relation".to_string(),
        "rmc <concept>                        supprime un concept".to_string(),
        "describe <phrase>                    résout une phrase".to_string(),
        "train <mot> [profondeur]             apprend depuis Wordnik".to_string(),
        String::new(),
        "relations:".to_string(),
    ];
    lines.extend(
        RelationKind::all()
            .iter()
            .map(|kind| format!("  {:<11} {}", kind.name(), kind.description())),
    );
    lines.join("\n")
}
