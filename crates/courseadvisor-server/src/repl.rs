//! Line-oriented chat shell.

use std::io::{self, BufRead, Write};

use courseadvisor_runtime::Advisor;
use tracing::error;

/// Run the chat loop until `exit`/`quit` or end of input.
///
/// Blocking; call from a blocking task when inside an async runtime.
pub fn run<R: BufRead, W: Write>(advisor: &Advisor, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "Course Advisor Bot 2.0 — type 'exit' to quit.\n")?;
    advisor.start_session();
    let tools: Vec<_> = advisor.capabilities().iter().map(|c| c.name()).collect();
    writeln!(out, "Loaded tools: {}\n", tools.join(", "))?;

    let mut lines = input.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let user = line.trim();
        if user.eq_ignore_ascii_case("exit") || user.eq_ignore_ascii_case("quit") {
            writeln!(out, "Bye!")?;
            break;
        }
        if user.is_empty() {
            continue;
        }

        match advisor.respond(user) {
            Ok(reply) => writeln!(out, "Bot: {}\n", reply.text)?,
            Err(e) => {
                error!("Advisor turn failed: {}", e);
                writeln!(out, "Bot: Sorry, the course catalog is unavailable right now ({}).\n", e)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use courseadvisor_core::{AdvisorConfig, SectionsConfig};
    use courseadvisor_store::{Catalog, Section};

    fn advisor() -> Advisor {
        let section: Section = serde_json::from_value(serde_json::json!({
            "Subject": "ENGLISH", "Crs_Number": "300", "Sec_Number": "A",
            "Section_Name": "ENGLISH 300-A", "Section_Title": "Shakespeare",
            "MtgPattern": "MWF 09:30 AM - 10:20 AM"
        }))
        .unwrap();
        Advisor::new(Arc::new(Catalog::from_sections(vec![section])), &AdvisorConfig::default())
    }

    fn session(advisor: &Advisor, input: &str) -> String {
        let mut out = Vec::new();
        run(advisor, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_until_quit() {
        let transcript = session(&advisor(), "morning english\n\nQUIT\nhello\n");
        assert!(transcript.contains("Loaded tools: find_courses"));
        assert!(transcript.contains("Bot: Found 1 match(es)"));
        assert!(transcript.trim_end().ends_with("Bye!"));
        // Nothing after quit is answered.
        assert_eq!(transcript.matches("Bot: ").count(), 1);
    }

    #[test]
    fn test_end_of_input() {
        let transcript = session(&advisor(), "hello");
        assert!(transcript.contains("Bot: Do you want to search by *interest*"));
        assert!(!transcript.contains("Bye!"));
    }

    #[test]
    fn test_dataset_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(SectionsConfig::with_path(dir.path().join("none.json")));
        let advisor = Advisor::new(Arc::new(catalog), &AdvisorConfig::default());
        let transcript = session(&advisor, "ethics\nexit\n");
        assert!(transcript.contains("Bot: Sorry, the course catalog is unavailable"));
        assert!(transcript.contains("Bye!"));
    }
}
