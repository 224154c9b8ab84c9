//! Line-oriented chat over the dataset.
//!
//! Each non-blank line is routed on its own; the transcript is kept only so
//! `:history` can reprint it.

use std::io::BufRead;

use attrition_core::{EmployeeRecord, QueryResponse, route};
use serde::Serialize;

use crate::{AppState, display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// Display-only conversation history.
#[derive(Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Route a question and record both sides. Blank input is not routed.
    pub fn ask(&mut self, question: &str, records: &[EmployeeRecord]) -> Option<QueryResponse> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        let response = route(question, records);
        self.turns.push(Turn {
            speaker: Speaker::User,
            text: question.to_string(),
        });
        self.turns.push(Turn {
            speaker: Speaker::Assistant,
            text: response.summary.clone(),
        });
        Some(response)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

/// Read questions from `input` until EOF or `:quit`.
pub fn run(state: &AppState, input: impl BufRead, json: bool) -> anyhow::Result<()> {
    let mut conversation = Conversation::default();
    if !json {
        display::print_examples();
        println!("Type :history to review the conversation, :quit to leave.");
    }

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            ":quit" | ":exit" => break,
            ":history" => print_history(&conversation, json)?,
            question => {
                let Some(response) = conversation.ask(question, state.dataset.records()) else {
                    continue;
                };
                if json {
                    display::print_json(&response)?;
                } else {
                    println!("user: {question}");
                    println!("assistant:");
                    display::print_response(&response);
                    println!();
                }
            }
        }
    }
    Ok(())
}

fn print_history(conversation: &Conversation, json: bool) -> anyhow::Result<()> {
    if json {
        return display::print_json(conversation.turns());
    }
    for turn in conversation.turns() {
        let who = match turn.speaker {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        };
        println!("{who}: {}", turn.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrition_core::QueryIntent;

    #[test]
    fn blank_lines_are_not_routed() {
        let mut conversation = Conversation::default();
        assert!(conversation.ask("", &[]).is_none());
        assert!(conversation.ask("   \t", &[]).is_none());
        assert!(conversation.turns().is_empty());
    }

    #[test]
    fn each_question_records_two_turns() {
        let mut conversation = Conversation::default();
        let resp = conversation.ask("  why do people leave? ", &[]).unwrap();
        assert_eq!(resp.intent, QueryIntent::ByFactor);

        let turns = conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "why do people leave?");
        assert_eq!(turns[1].speaker, Speaker::Assistant);
        assert_eq!(turns[1].text, resp.summary);
    }

    #[test]
    fn history_does_not_change_routing() {
        let mut conversation = Conversation::default();
        let first = conversation.ask("overtime", &[]).unwrap();
        conversation.ask("department", &[]);
        let again = conversation.ask("overtime", &[]).unwrap();
        assert_eq!(first, again);
    }
}
