//! Line-oriented command scripts that drive an [`ExplorerSession`] the way UI
//! events would.
//!
//! ```text
//! toggle satellite on
//! reorder osm satellite
//! tab dataset
//! region Kalimantan
//! sensor sentinel2 on
//! years 2015 2020
//! cloud 30
//! run generate composite
//! search ndvi --sort resolution --desc
//! dataset s2-ndvi
//! ```
//!
//! A word starting with `#` begins a comment; `#` inside a word is kept, so
//! ids like `ndvi#2018` stay addressable.

use catalog::{DatasetEntry, Region, Sensor, SortKey, SortOrder};
use explorer::{
    ActionOutcome, AnalysisAction, ExplorerError, ExplorerSession, SessionSnapshot, Tab,
};
use foundation::{Year, YearRange};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle { id: String, visible: bool },
    Reorder { source: String, target: String },
    Tab(Tab),
    Region(Option<Region>),
    Sensor { sensor: Sensor, enabled: bool },
    Years { start: Year, end: Year },
    StartYear(Year),
    EndYear(Year),
    Cloud(u32),
    Run(AnalysisAction),
    Search { query: String, key: SortKey, order: SortOrder },
    Dataset(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Parse { line: usize, message: String },
    Explorer { line: usize, source: ExplorerError },
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Parse { line, message } => write!(f, "line {line}: {message}"),
            ScriptError::Explorer { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Parse { .. } => None,
            ScriptError::Explorer { source, .. } => Some(source),
        }
    }
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "show" | "1" => Ok(true),
        "off" | "false" | "hide" | "0" => Ok(false),
        other => Err(format!("expected on/off, got {other:?}")),
    }
}

fn parse_year(s: &str) -> Result<Year, String> {
    s.parse::<u16>()
        .map(Year)
        .map_err(|_| format!("invalid year {s:?}"))
}

/// Parses one command. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace().take_while(|w| !w.starts_with('#'));
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let arity = |n: usize| -> Result<(), String> {
        if args.len() != n {
            return Err(format!("{verb} expects {n} argument(s), got {}", args.len()));
        }
        Ok(())
    };

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "toggle" => {
            arity(2)?;
            Command::Toggle {
                id: args[0].to_string(),
                visible: parse_switch(args[1])?,
            }
        }
        "reorder" => {
            arity(2)?;
            Command::Reorder {
                source: args[0].to_string(),
                target: args[1].to_string(),
            }
        }
        "tab" => Command::Tab(args.join(" ").parse::<Tab>().map_err(|e| e.to_string())?),
        "region" => {
            arity(1)?;
            if args[0].eq_ignore_ascii_case("none") {
                Command::Region(None)
            } else {
                let region = Region::parse(args[0])
                    .ok_or_else(|| ExplorerError::UnknownRegion(args[0].to_string()).to_string())?;
                Command::Region(Some(region))
            }
        }
        "sensor" => {
            arity(2)?;
            let sensor = Sensor::parse(args[0])
                .ok_or_else(|| ExplorerError::UnknownSensor(args[0].to_string()).to_string())?;
            Command::Sensor {
                sensor,
                enabled: parse_switch(args[1])?,
            }
        }
        "years" => {
            arity(2)?;
            Command::Years {
                start: parse_year(args[0])?,
                end: parse_year(args[1])?,
            }
        }
        "start" => {
            arity(1)?;
            Command::StartYear(parse_year(args[0])?)
        }
        "end" => {
            arity(1)?;
            Command::EndYear(parse_year(args[0])?)
        }
        "cloud" => {
            arity(1)?;
            let pct = args[0].trim_end_matches('%');
            Command::Cloud(
                pct.parse::<u32>()
                    .map_err(|_| format!("invalid percentage {:?}", args[0]))?,
            )
        }
        "run" => Command::Run(
            args.join(" ")
                .parse::<AnalysisAction>()
                .map_err(|e| e.to_string())?,
        ),
        "search" => parse_search(&args)?,
        "dataset" => {
            arity(1)?;
            Command::Dataset(args[0].to_string())
        }
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Some(cmd))
}

fn parse_search(args: &[&str]) -> Result<Command, String> {
    let mut query: Vec<&str> = Vec::new();
    let mut key = SortKey::default();
    let mut order = SortOrder::Ascending;

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--sort" => {
                i += 1;
                let Some(k) = args.get(i) else {
                    return Err("--sort requires a value".to_string());
                };
                key = k.parse::<SortKey>().map_err(|e| e.to_string())?;
            }
            "--desc" => order = SortOrder::Descending,
            "--asc" => order = SortOrder::Ascending,
            s if s.starts_with("--") => return Err(format!("unknown search flag {s:?}")),
            s => query.push(s),
        }
        i += 1;
    }

    Ok(Command::Search {
        query: query.join(" "),
        key,
        order,
    })
}

/// Parses a whole script; line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        match parse_command(raw) {
            Ok(Some(cmd)) => out.push((line, cmd)),
            Ok(None) => {}
            Err(message) => return Err(ScriptError::Parse { line, message }),
        }
    }
    Ok(out)
}

/// Parses commands given one per argument. They are numbered from
/// `first_line` on, so steps stay unique when appended after a script.
pub fn parse_arguments(
    args: &[String],
    first_line: usize,
) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut out = Vec::new();
    for (idx, raw) in args.iter().enumerate() {
        let line = first_line + idx;
        match parse_command(raw) {
            Ok(Some(cmd)) => out.push((line, cmd)),
            Ok(None) => {}
            Err(message) => return Err(ScriptError::Parse { line, message }),
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Applied { changed: bool },
    Rows { rows: Vec<DatasetEntry> },
    Action { outcome: ActionOutcome },
}

pub fn apply(
    session: &mut ExplorerSession,
    cmd: &Command,
) -> Result<CommandOutput, ExplorerError> {
    let changed = match cmd {
        Command::Toggle { id, visible } => session.toggle_layer_visibility(id, *visible),
        Command::Reorder { source, target } => session.reorder_layers(source, target),
        Command::Tab(tab) => session.select_tab(*tab),
        Command::Region(region) => session.select_region(*region),
        Command::Sensor { sensor, enabled } => session.set_sensor(*sensor, *enabled),
        Command::Years { start, end } => session.set_years(YearRange::new(*start, *end)?),
        Command::StartYear(y) => session.set_start_year(*y)?,
        Command::EndYear(y) => session.set_end_year(*y)?,
        Command::Cloud(pct) => session.set_cloud_cover(*pct)?,
        Command::Run(action) => {
            return Ok(CommandOutput::Action {
                outcome: session.trigger(*action),
            });
        }
        Command::Search { query, key, order } => {
            let rows = session
                .search_datasets(query, *key, *order)
                .into_iter()
                .cloned()
                .collect();
            return Ok(CommandOutput::Rows { rows });
        }
        Command::Dataset(id) => {
            let row = session.dataset(id)?.clone();
            return Ok(CommandOutput::Rows { rows: vec![row] });
        }
    };
    debug!(?cmd, changed, "command applied");
    Ok(CommandOutput::Applied { changed })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub line: usize,
    #[serde(flatten)]
    pub output: CommandOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub snapshot: SessionSnapshot,
}

/// Applies every command in order, stopping at the first failure.
pub fn run_script(
    session: &mut ExplorerSession,
    commands: &[(usize, Command)],
) -> Result<RunReport, ScriptError> {
    let mut steps = Vec::with_capacity(commands.len());
    for (line, cmd) in commands {
        let output = apply(session, cmd).map_err(|source| ScriptError::Explorer {
            line: *line,
            source,
        })?;
        steps.push(StepReport {
            line: *line,
            output,
        });
    }
    Ok(RunReport {
        steps,
        snapshot: session.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_layer_commands() {
        assert_eq!(
            parse_command("toggle satellite on").unwrap(),
            Some(Command::Toggle {
                id: "satellite".to_string(),
                visible: true
            })
        );
        assert_eq!(
            parse_command("  reorder C A  # drag C onto A").unwrap(),
            Some(Command::Reorder {
                source: "C".to_string(),
                target: "A".to_string()
            })
        );
        assert_eq!(parse_command("# comment only").unwrap(), None);
        assert_eq!(parse_command("").unwrap(), None);
    }

    #[test]
    fn parses_panel_commands() {
        assert_eq!(
            parse_command("tab map view").unwrap(),
            Some(Command::Tab(Tab::Map))
        );
        assert_eq!(
            parse_command("region none").unwrap(),
            Some(Command::Region(None))
        );
        assert_eq!(
            parse_command("sensor Sentinel-2 off").unwrap(),
            Some(Command::Sensor {
                sensor: Sensor::Sentinel2,
                enabled: false
            })
        );
        assert_eq!(parse_command("cloud 35%").unwrap(), Some(Command::Cloud(35)));
        assert_eq!(
            parse_command("run export results").unwrap(),
            Some(Command::Run(AnalysisAction::ExportResults))
        );
        assert_eq!(
            parse_command("search sentinel ndvi --sort res --desc").unwrap(),
            Some(Command::Search {
                query: "sentinel ndvi".to_string(),
                key: SortKey::Resolution,
                order: SortOrder::Descending
            })
        );
    }

    #[test]
    fn parse_errors_name_the_problem() {
        assert!(parse_command("toggle satellite").unwrap_err().contains("expects 2"));
        assert!(parse_command("toggle satellite maybe").unwrap_err().contains("on/off"));
        assert!(parse_command("region Atlantis").unwrap_err().contains("Atlantis"));
        assert!(parse_command("zoom 4").unwrap_err().contains("unknown command"));
        assert!(parse_command("search --sort").unwrap_err().contains("requires"));

        let err = parse_script("toggle osm on\nyears 2000 x\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
    }

    #[test]
    fn three_layer_reorder_script() {
        let cfg = explorer::ExplorerConfig::from_json_str(
            r#"{"layers": [
                {"id": "A", "name": "A", "visible": true},
                {"id": "B", "name": "B", "visible": true},
                {"id": "C", "name": "C", "visible": true}
            ]}"#,
        )
        .unwrap();
        let mut session = ExplorerSession::from_config(&cfg);
        let cmds = parse_script("reorder C A\nreorder C C\nreorder Z A\n").unwrap();
        let report = run_script(&mut session, &cmds).unwrap();

        let changed: Vec<CommandOutput> = report.steps.into_iter().map(|s| s.output).collect();
        assert_eq!(
            changed,
            vec![
                CommandOutput::Applied { changed: true },
                CommandOutput::Applied { changed: false },
                CommandOutput::Applied { changed: false },
            ]
        );
        let order: Vec<&str> = report.snapshot.layers.iter().map(|l| l.id().as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn run_stops_at_invalid_state_change() {
        let mut session = ExplorerSession::new();
        let cmds = parse_script("toggle satellite on\n\nyears 2020 2010\ncloud 50\n").unwrap();
        let err = run_script(&mut session, &cmds).unwrap_err();
        assert!(matches!(err, ScriptError::Explorer { line: 3, .. }));
        // First command applied, last one never ran.
        assert!(session.layers().get("satellite").unwrap().visible);
        assert_eq!(session.cloud_cover().get(), 20);
    }

    #[test]
    fn report_serializes_steps_with_line_numbers() {
        let mut session = ExplorerSession::new();
        let cmds = parse_script("run composite\nsensor palsar on\nsearch palsar").unwrap();
        let report = run_script(&mut session, &cmds).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["line"], 1);
        assert_eq!(json["steps"][0]["kind"], "action");
        assert_eq!(json["steps"][0]["outcome"]["status"], "placeholder");
        assert_eq!(json["steps"][2]["line"], 3);
        assert_eq!(json["steps"][2]["kind"], "rows");
        assert_eq!(json["steps"][2]["rows"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn hash_inside_a_word_is_part_of_the_id() {
        assert_eq!(
            parse_command("toggle ndvi#2018 on #turn it on").unwrap(),
            Some(Command::Toggle {
                id: "ndvi#2018".to_string(),
                visible: true
            })
        );
        assert_eq!(parse_command("   #indented comment").unwrap(), None);

        let cfg = explorer::ExplorerConfig::from_json_str(
            r#"{"layers": [{"id": "ndvi#2018", "name": "NDVI 2018", "visible": false}]}"#,
        )
        .unwrap();
        let mut session = ExplorerSession::from_config(&cfg);
        let cmds = parse_script("toggle ndvi#2018 on").unwrap();
        run_script(&mut session, &cmds).unwrap();
        assert!(session.layers().get("ndvi#2018").unwrap().visible);
    }

    #[test]
    fn argument_steps_are_numbered_after_the_script() {
        let script = "toggle satellite on\n# done\n";
        let mut cmds = parse_script(script).unwrap();
        let args = vec!["reorder osm satellite".to_string(), "cloud 500".to_string()];
        let first = script.lines().count() + 1;
        assert!(matches!(
            parse_arguments(&args, first),
            Ok(ref parsed) if parsed[0].0 == 3 && parsed[1].0 == 4
        ));
        cmds.extend(parse_arguments(&args, first).unwrap());

        let err = run_script(&mut ExplorerSession::new(), &cmds).unwrap_err();
        assert!(matches!(err, ScriptError::Explorer { line: 4, .. }));

        let bad = vec!["zoom 4".to_string()];
        assert!(matches!(
            parse_arguments(&bad, first),
            Err(ScriptError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn dataset_command_shows_one_row() {
        let mut session = ExplorerSession::new();
        let out = apply(&mut session, &Command::Dataset("palsar-hv".to_string())).unwrap();
        let CommandOutput::Rows { rows } = out else {
            panic!("expected rows, got {out:?}");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].variable, "HV");

        let err = apply(&mut session, &Command::Dataset("nope".to_string())).unwrap_err();
        assert!(matches!(err, ExplorerError::Catalog(_)));
    }
}
