use journal_client::{HistoryState, JournalEntry, SessionState, TodayStatus};

const PREVIEW_CHARS: usize = 140;

pub fn session(state: &SessionState) {
    let streak = state
        .streak
        .map(|n| n.to_string())
        .unwrap_or_else(|| "—".to_string());
    println!("Current streak: {streak}");

    let today = match &state.today {
        TodayStatus::Present(_) => "Submitted",
        TodayStatus::Absent => "Not yet",
        TodayStatus::Unknown => "Unknown",
    };
    println!("Today's entry:  {today}");

    if let Some(content) = state.today.entry().and_then(|e| e.content.as_deref()) {
        println!("\n{content}\n");
    }

    match state.display_error() {
        Some(error) => println!("Backend error:  {error}"),
        None if state.today.is_present() => {
            println!("You've already submitted today's entry. Come back tomorrow.")
        }
        None if state.can_submit() => println!("Ready for today's entry."),
        None => {}
    }

    if state.submission.last_success {
        println!("Saved! Your streak is updated.");
    }
    if let Some(error) = &state.submission.last_error {
        eprintln!("{error}");
    }
}

pub fn history(state: &HistoryState) {
    if let Some(error) = &state.list_error {
        eprintln!("{error}");
        return;
    }
    if state.entries.is_empty() {
        println!("No past entries yet. Submit your first entry with `journal submit`.");
        return;
    }

    for entry in &state.entries {
        let id = entry
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        println!("{:>6}  {}  {}", id, date(entry), preview(entry, PREVIEW_CHARS));
    }
}

pub fn selected(state: &HistoryState) {
    let Some(entry) = &state.selected else {
        return;
    };

    println!("Entry — {}", date(entry));
    if let Some(error) = &state.detail_error {
        eprintln!("{error}");
    }
    println!(
        "\n{}",
        entry.content.as_deref().unwrap_or("No content available.")
    );
}

fn date(entry: &JournalEntry) -> &str {
    entry.date.as_deref().unwrap_or("Unknown date")
}

fn preview(entry: &JournalEntry, max_chars: usize) -> String {
    let text = entry.content.as_deref().unwrap_or_default().trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}…")
}
