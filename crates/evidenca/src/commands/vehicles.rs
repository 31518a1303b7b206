//! Vehicle catalogue and registration.

use tabled::Tabled;

use evidenca_api::EvidencaClient;
use evidenca_core::{
    Session, Vehicle, VehicleBackend, VehicleBrand, VehicleModel, VehicleRegistrationForm,
};

use crate::cli::{GlobalOpts, VehiclesArgs, VehiclesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Make")]
    make: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Plate")]
    plate: String,
}

impl From<&Vehicle> for VehicleRow {
    fn from(v: &Vehicle) -> Self {
        let text = |s: &Option<String>| s.clone().unwrap_or_default();
        Self {
            id: v.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            make: text(&v.make),
            model: text(&v.model),
            year: text(&v.year),
            plate: text(&v.license_plate),
        }
    }
}

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Brand")]
    name: String,
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Brand ID")]
    brand: String,
    #[tabled(rename = "Model")]
    name: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: VehiclesArgs,
    client: EvidencaClient,
    session: Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = output::format(global);

    match args.command {
        VehiclesCommand::List { user } => {
            let owner = user.map_or_else(|| session.user.id.clone(), |u| util::entity_id(&u));
            let vehicles: Vec<Vehicle> = VehicleBackend::list_vehicles(&client, &owner)
                .await?
                .into_iter()
                .map(Vehicle::from)
                .collect();
            let out = output::render_list(
                format,
                &vehicles,
                |v| VehicleRow::from(v),
                |v| v.license_plate.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global);
            Ok(())
        }

        VehiclesCommand::Brands => {
            let brands: Vec<VehicleBrand> = VehicleBackend::list_vehicle_brands(&client)
                .await?
                .into_iter()
                .map(VehicleBrand::from)
                .collect();
            let out = output::render_list(
                format,
                &brands,
                |b| BrandRow {
                    id: b.id.to_string(),
                    name: b.name.clone(),
                },
                |b| b.id.to_string(),
            )?;
            output::print_output(&out, global);
            Ok(())
        }

        VehiclesCommand::Models { brand } => {
            let brand = brand.as_deref().map(util::entity_id);
            let models: Vec<VehicleModel> = VehicleBackend::list_vehicle_models(&client)
                .await?
                .into_iter()
                .map(VehicleModel::from)
                .filter(|m| brand.is_none() || m.brand_id == brand)
                .collect();
            let out = output::render_list(
                format,
                &models,
                |m| ModelRow {
                    id: m.id.to_string(),
                    brand: m.brand_id.as_ref().map(ToString::to_string).unwrap_or_default(),
                    name: m.name.clone(),
                },
                |m| m.id.to_string(),
            )?;
            output::print_output(&out, global);
            Ok(())
        }

        VehiclesCommand::Add {
            brand,
            model,
            year,
            plate,
            user,
            model_name,
        } => {
            let mut form = VehicleRegistrationForm::new(client, session);
            form.load().await?;

            let brand = util::entity_id(&brand);
            if !form.brands().iter().any(|b| b.id == brand) {
                return Err(CliError::NotFound {
                    resource_type: "Vehicle brand".into(),
                    identifier: brand.to_string(),
                    list_command: "vehicles brands".into(),
                });
            }
            form.select_brand(&brand);

            let model = util::entity_id(&model);
            if !form.filtered_models().iter().any(|m| m.id == model) {
                return Err(CliError::NotFound {
                    resource_type: "Vehicle model".into(),
                    identifier: model.to_string(),
                    list_command: format!("vehicles models --brand {brand}"),
                });
            }
            if let Some(name) = model_name {
                form.draft_mut().model = name;
            }
            form.select_model(&model);

            if let Some(ref user) = user {
                if !form.select_user(&util::entity_id(user)) {
                    return Err(CliError::NotPermitted {
                        action: "register vehicles for other users".into(),
                    });
                }
            }
            let draft = form.draft_mut();
            draft.year = year;
            draft.license_plate = plate;

            form.submit().await?;
            output::notice(form.confirmation().unwrap_or_default(), global);
            Ok(())
        }
    }
}
