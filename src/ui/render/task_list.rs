use super::Frame;
use crate::state::{FormFocus, State, Task};
use crate::ui::widgets::{styling, thumbnail};
use crate::utils::date::format_date;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Actions offered on a task row.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Cancel,
    Complete,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Edit => "[Enter] edit",
            RowAction::Cancel => "[x] Cancel",
            RowAction::Complete => "[c] Complete",
        }
    }
}

/// Return the actions shown for a task. Complete is only offered until the
/// task is completed.
///
pub fn row_actions(task: &Task) -> Vec<RowAction> {
    let mut actions = vec![RowAction::Edit, RowAction::Cancel];
    if !task.completed {
        actions.push(RowAction::Complete);
    }
    actions
}

fn task_item<'a>(task: &'a Task, state: &State) -> ListItem<'a> {
    let theme = state.get_theme();
    let mut lines = vec![Line::from(Span::styled(
        task.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        task.description
            .lines()
            .map(|line| Line::from(Span::raw(line))),
    );
    lines.push(Line::from(Span::styled(
        format!("Date: {}", format_date(task.date)),
        styling::muted_text_style(theme),
    )));
    if let Some(preview) = task.image.as_ref().and_then(|image| image.thumbnail.as_ref()) {
        let background = if task.completed {
            theme.completed_bg.to_color()
        } else {
            ratatui::style::Color::Reset
        };
        lines.extend(thumbnail::lines(preview, background));
    }
    let actions = row_actions(task)
        .into_iter()
        .map(RowAction::label)
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(Line::from(Span::styled(
        actions,
        Style::default().fg(theme.accent.to_color()),
    )));
    lines.push(Line::from(""));

    let item = ListItem::new(lines);
    if task.completed {
        item.style(styling::completed_row_style(theme))
    } else {
        item.style(styling::normal_text_style(theme))
    }
}

/// Render the task list.
///
pub fn task_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let active = state.current_focus() == FormFocus::Tasks;
    let theme = state.get_theme().clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" Tasks ({}) ", state.tasks().len()),
            styling::active_block_title_style(),
        ))
        .border_style(styling::block_border_style(&theme, active));

    if state.tasks().is_empty() {
        let empty = Paragraph::new("No tasks yet.")
            .style(styling::muted_text_style(&theme))
            .block(block);
        frame.render_widget(empty, size);
        return;
    }

    let mut list_state = state.get_tasks_list_state().clone();
    let items: Vec<ListItem> = state
        .tasks()
        .iter()
        .map(|task| task_item(task, state))
        .collect();
    let highlight = if active {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, size, &mut list_state);
    *state.get_tasks_list_state() = list_state;
}
