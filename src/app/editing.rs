//! Interactive edits applied to a stored report: one edit, one load/save.

use crate::core::report_store;
use crate::domain::model::SectionId;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Insert {
        index: Option<usize>,
        title: String,
        content: String,
    },
    Update {
        id: SectionId,
        title: String,
        content: String,
    },
    Delete {
        id: SectionId,
    },
    Move {
        id: SectionId,
        to_index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Inserted { id: SectionId, order: usize },
    Updated,
    Deleted,
    Moved { order: usize },
    /// Unknown id or a move onto the current position.
    Unchanged,
}

pub async fn apply_edit<S: Storage>(
    storage: &S,
    report_path: &str,
    report_title: &str,
    command: EditCommand,
) -> Result<EditOutcome> {
    let mut report = report_store::load_or_new(storage, report_path, report_title).await?;
    let ledger = &mut report.sections;

    let outcome = match command {
        EditCommand::Insert {
            index,
            title,
            content,
        } => {
            let section = match index {
                Some(index) => ledger.insert_at(index, title, content),
                None => ledger.append(title, content),
            };
            EditOutcome::Inserted {
                id: section.id(),
                order: section.order(),
            }
        }
        EditCommand::Update { id, title, content } => {
            if ledger.update(id, title, content) {
                EditOutcome::Updated
            } else {
                EditOutcome::Unchanged
            }
        }
        EditCommand::Delete { id } => match ledger.delete(id) {
            Some(_) => EditOutcome::Deleted,
            None => EditOutcome::Unchanged,
        },
        EditCommand::Move { id, to_index } => {
            if ledger.move_section(id, to_index) {
                let order = ledger.position_of(id).unwrap_or(to_index);
                EditOutcome::Moved { order }
            } else {
                EditOutcome::Unchanged
            }
        }
    };

    if outcome == EditOutcome::Unchanged {
        tracing::info!("Nothing changed, report left as is");
        return Ok(outcome);
    }

    report.touch();
    report_store::save(storage, report_path, &report).await?;
    tracing::debug!("Applied edit: {:?}", outcome);
    Ok(outcome)
}
