//! Background loading of subject files.
//!
//! Each request spawns a tokio task that reads and parses the file, then
//! reports back over an unbounded channel. Requests are identified by a
//! fresh ticket; the application keeps only the newest ticket and drops
//! outcomes carrying any other, so a slow load can never clobber the
//! session started by a later one.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::catalog::Subject;
use crate::format;
use crate::models::Question;

/// Token identifying one load request.
pub type LoadTicket = Uuid;

/// Completion report for one load request.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub subject: String,
    pub result: Result<Vec<Question>, LoadError>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("não foi possível ler {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("nenhuma pergunta encontrada em {path}")]
    Empty { path: PathBuf },
}

/// Start loading `subject` on a background task and return the request's
/// ticket. The outcome arrives on `tx` whenever the task finishes.
pub fn spawn_load(subject: &Subject, tx: &UnboundedSender<LoadOutcome>) -> LoadTicket {
    let ticket = Uuid::new_v4();
    let name = subject.name.clone();
    let path = subject.path.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = load_file(&path).await;
        let outcome = LoadOutcome {
            ticket,
            subject: name,
            result,
        };
        if tx.send(outcome).is_err() {
            log::debug!("load receiver dropped before {} finished", path.display());
        }
    });

    ticket
}

async fn load_file(path: &Path) -> Result<Vec<Question>, LoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let questions = format::parse_questions(&raw);
    if questions.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::sync::mpsc;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!("simulado-load-{}.txt", Uuid::new_v4()));
            fs::write(&path, contents).unwrap();
            Self(path)
        }

        fn subject(&self) -> Subject {
            Subject {
                name: "prova".to_string(),
                path: self.0.clone(),
            }
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[tokio::test]
    async fn load_reports_parsed_questions() {
        let file = TempFile::new("Pergunta: 2+2?\nA) 3\nB) 4\nCorreta: 2\n");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticket = spawn_load(&file.subject(), &tx);
        let outcome = rx.recv().await.unwrap();

        assert_eq!(outcome.ticket, ticket);
        assert_eq!(outcome.subject, "prova");
        let questions = outcome.result.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index(), Some(1));
    }

    #[tokio::test]
    async fn missing_file_reports_a_read_error() {
        let subject = Subject {
            name: "fantasma".to_string(),
            path: std::env::temp_dir().join(format!("simulado-none-{}.txt", Uuid::new_v4())),
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_load(&subject, &tx);
        let outcome = rx.recv().await.unwrap();

        assert!(matches!(outcome.result, Err(LoadError::Read { .. })));
    }

    #[tokio::test]
    async fn file_without_questions_reports_empty() {
        let file = TempFile::new("apenas anotações soltas\nsem perguntas\n");
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_load(&file.subject(), &tx);
        let outcome = rx.recv().await.unwrap();

        assert!(matches!(outcome.result, Err(LoadError::Empty { .. })));
    }

    #[tokio::test]
    async fn each_request_gets_a_fresh_ticket() {
        let file = TempFile::new("Pergunta: ok?\nA) sim\nCorreta: 1\n");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let first = spawn_load(&file.subject(), &tx);
        let second = spawn_load(&file.subject(), &tx);
        assert_ne!(first, second);

        // Both tasks complete; outcomes carry their own tickets.
        let mut seen = [rx.recv().await.unwrap().ticket, rx.recv().await.unwrap().ticket];
        let mut issued = [first, second];
        seen.sort();
        issued.sort();
        assert_eq!(seen, issued);
    }
}
