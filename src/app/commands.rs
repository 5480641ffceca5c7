use crate::config::{cli::Command, EngineConfig};
use crate::core::convert::{
    extract_board_and_slot, format_ports_for_api, port_to_alpha, port_to_decimal,
};
use crate::core::imei::{
    expand_imeis, import_imei_changes, plan_imei_changes, validate_imei_changes,
    write_imei_template,
};
use crate::domain::model::{ImeiChange, Notation};
use crate::utils::error::Result;
use serde::Serialize;

/// Text a command prints to stdout, plus warnings for stderr.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub warnings: Vec<String>,
}

impl CommandOutput {
    fn text(stdout: String) -> Self {
        Self {
            stdout,
            warnings: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct ImeiBatch<'a> {
    changes: &'a [ImeiChange],
    warnings: &'a [String],
}

fn render_changes(changes: &[ImeiChange], json: bool) -> Result<CommandOutput> {
    let warnings = validate_imei_changes(changes);

    if json {
        let stdout = serde_json::to_string_pretty(&ImeiBatch {
            changes,
            warnings: &warnings,
        })?;
        return Ok(CommandOutput { stdout, warnings });
    }

    let mut lines = vec!["port\tslot\timei".to_string()];
    lines.extend(
        changes
            .iter()
            .map(|c| format!("{}\t{}\t{}", c.port_label(), c.slot, c.imei)),
    );
    Ok(CommandOutput {
        stdout: lines.join("\n"),
        warnings,
    })
}

/// Runs one subcommand against the loaded engine configuration.
pub fn run(command: &Command, config: &EngineConfig) -> Result<CommandOutput> {
    let parser = config.parser();

    match command {
        Command::Expand { spec, format, json } => {
            let ports = parser.expand(spec)?;
            let notation = format.unwrap_or_else(|| config.output_format());
            tracing::info!("✅ Expanded '{}' into {} ports", spec, ports.len());

            if *json {
                let converted: Vec<_> = ports.iter().map(|p| p.in_notation(notation)).collect();
                Ok(CommandOutput::text(serde_json::to_string(&converted)?))
            } else {
                Ok(CommandOutput::text(format_ports_for_api(&ports, notation)))
            }
        }
        Command::Convert { ports, to } => {
            let converted = ports
                .iter()
                .map(|port| match to {
                    Notation::Alpha => port_to_alpha(port),
                    Notation::Decimal => port_to_decimal(port),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CommandOutput::text(converted.join("\n")))
        }
        Command::Locate { ports } => {
            let lines = ports
                .iter()
                .map(|port| {
                    let (board, slot) = extract_board_and_slot(port)?;
                    Ok(format!("{}\tboard={}\tslot={}", port.trim(), board, slot))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CommandOutput::text(lines.join("\n")))
        }
        Command::ImeiPlan { ports, imeis, json } => {
            let ports = parser.expand(ports)?;
            let imeis = expand_imeis(imeis)?;
            let changes = plan_imei_changes(&ports, &imeis)?;
            tracing::info!("📱 Planned {} IMEI changes", changes.len());
            render_changes(&changes, *json)
        }
        Command::ImeiTemplate { ports, output } => {
            let ports = ports.as_deref().map(|spec| parser.expand(spec)).transpose()?;
            write_imei_template(output, ports.as_ref())?;
            Ok(CommandOutput::text(format!(
                "IMEI template written to {}",
                output.display()
            )))
        }
        Command::ImeiImport { file, json } => {
            let changes = import_imei_changes(file)?;
            render_changes(&changes, *json)
        }
    }
}
