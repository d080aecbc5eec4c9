//! Line-oriented command front end over a `ConceptStore`.

mod commands;

pub use commands::{help_text, Command};

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::domain::ConceptId;
use crate::memory::{ConceptStore, SnapshotLoader, SnapshotWriter};
use crate::reasoning::{describe_phrase, RelationQueryService};
use crate::training::Trainer;
use crate::utils::split_into_argv;

pub struct Shell {
    store: ConceptStore,
    trainer: Option<Trainer>,
}

impl Shell {
    pub fn new(store: ConceptStore) -> Self {
        Self {
            store,
            trainer: None,
        }
    }

    pub fn with_trainer(mut self, trainer: Trainer) -> Self {
        self.trainer = Some(trainer);
        self
    }

    pub fn store(&self) -> &ConceptStore {
        &self.store
    }

    pub fn into_store(self) -> ConceptStore {
        self.store
    }

    /// Runs one input line. Blank lines produce no output.
    pub fn execute(&mut self, line: &str) -> Result<String> {
        let argv = split_into_argv(line);
        if argv.is_empty() {
            return Ok(String::new());
        }
        let command = Command::parse(&argv)?;
        debug!(?command, "message" = "commande reçue");
        self.run(command)
    }

    pub fn run(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Dump { path } => {
                SnapshotWriter::save_to_path(&path, &self.store)?;
                Ok(format!(
                    "{} concepts écrits dans {}",
                    self.store.len(),
                    path.display()
                ))
            }
            Command::Read { path } => {
                let snapshot = SnapshotLoader::load_from_path(&path)?;
                let version = snapshot.version.clone();
                self.store
                    .restore(snapshot)
                    .with_context(|| format!("instantané refusé: {}", path.display()))?;
                Ok(format!("Version {version}"))
            }
            Command::NewConcept { name, concept_type } => {
                let concept = self.store.create_concept(&name, concept_type)?;
                Ok(concept.to_string())
            }
            Command::List => Ok(RelationQueryService::new(&self.store)
                .listing()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
            Command::Relate {
                owner,
                kind,
                targets,
            } => {
                let owner = self.store.require(&owner)?.id;
                let relation = self.store.add_relation(owner, kind, targets.as_slice())?.id;
                Ok(format!("{} |-> {} (id={})", self.concept_line(owner), kind, relation))
            }
            Command::Unrelate { owner, relation } => {
                let owner = self.store.require(&owner)?.id;
                self.store.remove_relation(owner, relation)?;
                Ok(self.concept_line(owner))
            }
            Command::RemoveConcept { selector } => {
                let id = self.store.require(&selector)?.id;
                let removed = self.store.remove_concept(id)?;
                Ok(format!("supprimé: {removed}"))
            }
            Command::Describe { phrase } => Ok(describe_phrase(&self.store, &phrase)?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
            Command::Train { word, depth } => {
                let trainer = self
                    .trainer
                    .as_ref()
                    .ok_or_else(|| anyhow!("entraînement indisponible: aucune clé Wordnik configurée"))?;
                let depth = depth.unwrap_or(trainer.config().max_depth);
                let stats = trainer.train_with_depth(&mut self.store, &word, depth)?;
                Ok(format!(
                    "{} concepts créés, {} relations ajoutées, {} ignorées",
                    stats.concepts_created, stats.relations_added, stats.relations_skipped
                ))
            }
            Command::Help => Ok(help_text()),
        }
    }

    fn concept_line(&self, id: ConceptId) -> String {
        self.store
            .get(id)
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("#{id}"))
    }

    /// Prompt loop: reads lines until end of input, printing `err: ...` for
    /// failed commands and carrying on.
    pub fn run_repl<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write!(output, "> ")?;
        output.flush()?;
        for line in input.lines() {
            let line = line.context("lecture de l'entrée impossible")?;
            match self.execute(&line) {
                Ok(text) if text.is_empty() => {}
                Ok(text) => writeln!(output, "{text}")?,
                Err(err) => writeln!(output, "err: {err:#}")?,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }
}
