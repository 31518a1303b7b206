//! User directory.

use tabled::Tabled;

use evidenca_api::EvidencaClient;
use evidenca_core::{UserSummary, VehicleBackend};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

pub async fn handle(
    args: UsersArgs,
    client: &EvidencaClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List => {
            let users: Vec<UserSummary> = VehicleBackend::list_users(client)
                .await?
                .into_iter()
                .map(UserSummary::from)
                .collect();
            let out = output::render_list(
                output::format(global),
                &users,
                |u| UserRow {
                    id: u.id.to_string(),
                    name: u.display_name(),
                },
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global);
            Ok(())
        }
    }
}
