use std::fmt::Write;

use assign_lib::directory::Directory;
use assign_lib::entities::User;
use assign_lib::session::{AdminSession, BossState, Notice, NoticeLevel};
use assign_lib::table::AssignmentTable;

pub fn notice(notice: &Notice) -> String {
    let label = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{label}] {}", notice.message)
}

fn user_line(user: &User) -> String {
    format!("{:>6}  {}", user.id, user.username)
}

/// Active users grouped by role.
pub fn users(directory: &Directory) -> String {
    let mut out = String::new();
    let groups = [
        ("Managers", directory.managers()),
        ("Employees", directory.employees()),
        ("Dealers", directory.dealers()),
    ];

    for (title, users) in groups {
        let _ = writeln!(out, "{title} ({})", users.len());
        for user in users {
            let _ = writeln!(out, "{}", user_line(user));
        }
    }
    out
}

/// The checklist of the selected boss with its live selected count.
pub fn checklist(session: &AdminSession) -> String {
    let mut out = String::new();

    let (boss_id, relation) = match session.state() {
        BossState::Ready {
            boss_id, relation, ..
        } => (*boss_id, *relation),
        BossState::Failed {
            boss_id, reason, ..
        } => {
            let _ = writeln!(
                out,
                "Could not load {}: {reason}",
                session.directory().display_name(*boss_id)
            );
            return out;
        }
        _ => return "No boss selected\n".to_string(),
    };

    let _ = writeln!(
        out,
        "{} {} ({relation})",
        relation.boss_role(),
        session.directory().display_name(boss_id)
    );
    if let Some(term) = session.search() {
        let _ = writeln!(out, "search: {term}");
    }

    let checklist = session.checklist();
    if checklist.is_empty() {
        let _ = writeln!(out, "  no {}s found", relation.child_role());
    }
    for row in checklist.rows() {
        let mark = if row.checked { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {}", user_line(&row.user));
    }

    let hidden = checklist.hidden_checked().len();
    if hidden > 0 {
        let _ = writeln!(out, "  (+{hidden} assigned, not shown)");
    }

    let _ = writeln!(out, "{} selected", checklist.selected_count());
    out
}

pub fn table(table: &AssignmentTable) -> String {
    let mut out = String::new();
    let relation = table.relation();

    let _ = writeln!(out, "{relation} ({} assigned)", table.edge_count());
    if table.is_empty() {
        let _ = writeln!(out, "  no assignments");
    }
    for row in table.rows() {
        let children = row
            .children
            .iter()
            .map(|c| c.username.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  {} -> {children}", row.boss.username);
    }

    if !table.failed_bosses().is_empty() {
        let _ = writeln!(
            out,
            "  could not load {} {}(s)",
            table.failed_bosses().len(),
            relation.boss_role()
        );
    }
    out
}
