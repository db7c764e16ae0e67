//! Line-command driver over the root component.

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use geomarker::data::SimulatedLocationProvider;
use geomarker::domain::{CameraPosition, LatLng, MarkerId, DEFAULT_ZOOM};
use geomarker::ui::editor::EditorIntent;
use geomarker::ui::geomarker::GeoMarkerIntent;
use geomarker::ui::image_picker::ImagePickerIntent;
use geomarker::ui::map::{MapComponent, MapIntent};
use geomarker::ui::marker_details::MarkerDetailsIntent;
use geomarker::ui::root::{RootChild, RootComponent};

pub const HELP: &str = "\
commands:
  add                     open the editor for a new marker
  select <id>             show a marker in the sheet
  edit                    edit the marker shown in the sheet
  title <text>            set the editor title
  desc <text>             set the editor description
  move <lat> <lon>        move the active map camera
  zoom <delta>            zoom the active map
  fix <lat> <lon>         report a device location fix
  images                  open the image picker
  pick <uri>              toggle an image in the picker
  confirm | cancel        close the image picker
  save | delete           persist or remove the edited marker
  back                    navigate back
  state                   print the active screen
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    Select(MarkerId),
    Edit,
    Title(String),
    Description(String),
    Move(LatLng),
    Zoom(f32),
    Fix(LatLng),
    Images,
    Pick(String),
    Confirm,
    Cancel,
    Save,
    Delete,
    Back,
    State,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word {
            "add" => Command::Add,
            "select" => Command::Select(rest.parse().map_err(|_| anyhow!("expected a marker id"))?),
            "edit" => Command::Edit,
            "title" => Command::Title(rest.to_string()),
            "desc" => Command::Description(rest.to_string()),
            "move" => Command::Move(parse_point(rest)?),
            "zoom" => Command::Zoom(
                rest.parse()
                    .ok()
                    .filter(|delta: &f32| delta.is_finite())
                    .ok_or_else(|| anyhow!("expected a zoom delta"))?,
            ),
            "fix" => Command::Fix(parse_point(rest)?),
            "images" => Command::Images,
            "pick" if !rest.is_empty() => Command::Pick(rest.to_string()),
            "confirm" => Command::Confirm,
            "cancel" => Command::Cancel,
            "save" => Command::Save,
            "delete" => Command::Delete,
            "back" => Command::Back,
            "state" => Command::State,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(command)
    }
}

fn parse_point(text: &str) -> Result<LatLng> {
    let mut parts = text.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(latitude)), Some(Ok(longitude)), None)
            if latitude.is_finite() && longitude.is_finite() =>
        {
            Ok(LatLng::new(latitude, longitude))
        }
        _ => bail!("expected '<lat> <lon>'"),
    }
}

pub struct Session {
    root: RootComponent,
    location: Arc<SimulatedLocationProvider>,
}

impl Session {
    pub fn new(root: RootComponent, location: Arc<SimulatedLocationProvider>) -> Self {
        Self { root, location }
    }

    pub fn root(&self) -> &RootComponent {
        &self.root
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn execute(&self, command: Command) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Help => println!("{}", HELP),
            Command::Back => {
                if !self.root.back() {
                    println!("nothing to go back from");
                }
            }
            Command::Fix(point) => self.location.push_fix(point),
            Command::State => self.print_state(),
            other => self.root.with_active(|child| dispatch(child, other))?,
        }
        Ok(true)
    }

    fn print_state(&self) {
        println!("screens: {:?}", self.root.configs());
        self.root.with_active(|child| match child {
            RootChild::GeoMarkers(main) => {
                let state = main.state();
                println!("markers: {:?}", state.markers);
                println!("selected: {:?}", state.selected_marker_id);
                println!("map: {:?}", main.map().state().camera);
                println!("sheet: {:?}", main.sheet().active_config());
                if let Some(details) = main.sheet().details_state() {
                    println!("details: {:?}", details.content);
                }
            }
            RootChild::Editor(editor) => {
                println!("editor: {:?}", editor.state());
                if let Some(picker) = editor.image_picker_state() {
                    println!("picker: {:?}", picker);
                }
            }
        });
    }
}

fn active_map(child: &RootChild) -> &MapComponent {
    match child {
        RootChild::GeoMarkers(main) => main.map(),
        RootChild::Editor(editor) => editor.map(),
    }
}

fn dispatch(child: &RootChild, command: Command) -> Result<()> {
    match command {
        Command::Move(point) => {
            let zoom = active_map(child)
                .state()
                .camera
                .map_or(DEFAULT_ZOOM, |camera| camera.zoom);
            active_map(child).accept(MapIntent::UpdateCameraPosition(CameraPosition::centered(
                point, zoom,
            )));
            return Ok(());
        }
        Command::Zoom(delta) => {
            active_map(child).accept(MapIntent::ChangeZoom(delta));
            return Ok(());
        }
        _ => {}
    }

    match (child, command) {
        (RootChild::GeoMarkers(main), Command::Add) => {
            main.accept(GeoMarkerIntent::AddMarkerClicked)
        }
        (RootChild::GeoMarkers(main), Command::Select(id)) => {
            main.accept(GeoMarkerIntent::SelectMarker(id))
        }
        (RootChild::GeoMarkers(main), Command::Edit) => match main.sheet().details() {
            Some(details) => details.accept(MarkerDetailsIntent::EditClicked),
            None => bail!("select a marker first"),
        },
        (RootChild::Editor(editor), Command::Title(title)) => {
            editor.accept(EditorIntent::TitleChanged(title))
        }
        (RootChild::Editor(editor), Command::Description(text)) => {
            editor.accept(EditorIntent::DescriptionChanged(text))
        }
        (RootChild::Editor(editor), Command::Images) => {
            editor.accept(EditorIntent::AddImagesClicked)
        }
        (RootChild::Editor(editor), Command::Save) => editor.accept(EditorIntent::SaveClicked),
        (RootChild::Editor(editor), Command::Delete) => editor.accept(EditorIntent::DeleteClicked),
        (RootChild::Editor(editor), command @ (Command::Pick(_) | Command::Confirm | Command::Cancel)) => {
            let Some(picker) = editor.image_picker() else {
                bail!("the image picker is not open");
            };
            picker.accept(match command {
                Command::Pick(uri) => ImagePickerIntent::ImageClicked(uri),
                Command::Confirm => ImagePickerIntent::ConfirmClicked,
                _ => ImagePickerIntent::CancelClicked,
            });
        }
        (_, command) => bail!("{:?} is not available on this screen", command),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arguments() {
        assert_eq!(Command::parse("select 12").unwrap(), Command::Select(12));
        assert_eq!(
            Command::parse("title  Old harbour ").unwrap(),
            Command::Title("Old harbour".to_string())
        );
        assert_eq!(
            Command::parse("fix 10.5 -20").unwrap(),
            Command::Fix(LatLng::new(10.5, -20.0))
        );
        assert_eq!(Command::parse("zoom -1.5").unwrap(), Command::Zoom(-1.5));
        assert!(Command::parse("zoom NaN").is_err());
        assert!(Command::parse("zoom inf").is_err());
        assert!(Command::parse("fix NaN 1").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Command::parse("select x").is_err());
        assert!(Command::parse("fix 1").is_err());
        assert!(Command::parse("fix 1 2 3").is_err());
        assert!(Command::parse("pick").is_err());
        assert!(Command::parse("fly").is_err());
    }
}
