//! Project board commands.

use tabled::Tabled;

use evidenca_api::EvidencaClient;
use evidenca_core::{Priority, Progress, Project, ProjectBoard, ProjectStatus};

use crate::cli::{GlobalOpts, ProjectsArgs, ProjectsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            priority: p.priority.to_string(),
            status: p.status.to_string(),
            progress: p.progress.to_string(),
        }
    }
}

fn detail(p: &Project) -> String {
    format!(
        "{}\n  ID:       {}\n  Priority: {}\n  Status:   {}\n  Progress: {}",
        p.name, p.id, p.priority, p.status, p.progress
    )
}

pub async fn handle(
    args: ProjectsArgs,
    client: EvidencaClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut board = ProjectBoard::new(client);

    match args.command {
        ProjectsCommand::List { active, closed } => {
            board.load().await?;
            let projects: Vec<Project> = if active {
                board.active().into_iter().cloned().collect()
            } else if closed {
                board.closed().into_iter().cloned().collect()
            } else {
                board.projects().to_vec()
            };
            let out = output::render_list(
                output::format(global),
                &projects,
                |p| ProjectRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global);
            Ok(())
        }

        ProjectsCommand::Add {
            name,
            priority,
            status,
        } => {
            let created = board
                .add_project(&name, Priority::from(priority), ProjectStatus::from(status))
                .await?;
            output::notice(&format!("Project '{}' created", created.name), global);
            print_project(&created, global)
        }

        ProjectsCommand::Update {
            id,
            priority,
            status,
            progress,
        } => {
            if priority.is_none() && status.is_none() && progress.is_none() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "pass at least one of --priority, --status, --progress".into(),
                });
            }
            board.load().await?;
            let id = util::entity_id(&id);
            let opened = board.open_editor(&id);
            let editor = match board.editor_mut() {
                Some(editor) if opened => editor,
                _ => {
                    return Err(CliError::NotFound {
                        resource_type: "Project".into(),
                        identifier: id.to_string(),
                        list_command: "projects list".into(),
                    });
                }
            };
            if let Some(priority) = priority {
                editor.priority = Priority::from(priority);
            }
            if let Some(status) = status {
                editor.status = ProjectStatus::from(status);
            }
            if let Some(progress) = progress {
                editor.progress = Progress::new(progress);
            }

            let saved = board.save().await?;
            output::notice("Project updated", global);
            print_project(&saved, global)
        }
    }
}

fn print_project(project: &Project, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(output::format(global), project, detail, |p| {
        p.id.to_string()
    })?;
    output::print_output(&out, global);
    Ok(())
}
