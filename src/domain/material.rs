// Material families and the property pairs plotted for each of them
use super::error::{GraphError, Result};
use super::graph::AxisScale::{Linear, Logarithmic};
use super::graph::{Axis, GraphSpec};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Thermoelectric,
    Battery,
    Magnetic,
}

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [
        MaterialType::Thermoelectric,
        MaterialType::Battery,
        MaterialType::Magnetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Thermoelectric => "thermoelectric",
            MaterialType::Battery => "battery",
            MaterialType::Magnetic => "magnetic",
        }
    }

    /// Every catalogued graph for this material, in menu order.
    pub fn graphs(&self) -> Vec<GraphSpec> {
        match self {
            MaterialType::Thermoelectric => thermoelectric_graphs(),
            MaterialType::Battery => battery_graphs(),
            MaterialType::Magnetic => magnetic_graphs(),
        }
    }

    pub fn find_graph(&self, property_x: &str, property_y: &str) -> Result<GraphSpec> {
        self.graphs()
            .into_iter()
            .find(|graph| graph.is_pair(property_x, property_y))
            .ok_or_else(|| GraphError::UnknownGraph {
                material: self.as_str().to_string(),
                property_x: property_x.to_string(),
                property_y: property_y.to_string(),
            })
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MaterialType::ALL
            .into_iter()
            .find(|material| material.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown material type: {}", s))
    }
}

fn thermoelectric_graphs() -> Vec<GraphSpec> {
    let temperature = || Axis::new("Temperature", "K", Linear, -5.0, 1150.0);
    vec![
        GraphSpec::new(
            temperature(),
            Axis::new("Seebeck coefficient", "V/K", Linear, -300.0, 300.0),
        ),
        GraphSpec::new(
            temperature(),
            Axis::new("Electrical conductivity", "S/m", Logarithmic, 1e2, 1e6),
        ),
        GraphSpec::new(
            temperature(),
            Axis::new("Electrical resistivity", "Ω·m", Logarithmic, 1e-6, 1e4),
        ),
        GraphSpec::new(
            temperature(),
            Axis::new("Thermal conductivity", "W/(m·K)", Linear, 0.0, 10.0),
        ),
        GraphSpec::new(
            temperature(),
            Axis::new("Power factor", "W/(m·K²)", Linear, 0.0, 0.01),
        ),
        GraphSpec::new(temperature(), Axis::new("ZT", "-", Linear, 0.0, 1.5)),
    ]
}

fn battery_graphs() -> Vec<GraphSpec> {
    let capacity = |property: &str| Axis::new(property, "mA*h/g", Linear, 0.0, 2000.0);
    let cycle_number = || Axis::new("Cycle number", "-", Linear, 1.0, 2000.0);
    vec![
        GraphSpec::new(
            capacity("Discharge capacity"),
            Axis::new("Voltage", "V", Linear, 0.0, 5.0),
        ),
        GraphSpec::new(
            capacity("Charge capacity"),
            Axis::new("Voltage", "V", Linear, 0.0, 5.0),
        ),
        GraphSpec::new(cycle_number(), capacity("Discharge capacity")),
        GraphSpec::new(
            Axis::new("C rate", "-", Linear, 0.0, 5.0),
            capacity("Discharge capacity"),
        ),
        GraphSpec::new(
            Axis::new("Time", "s", Linear, 1.0, 1000.0),
            Axis::new("Voltage", "V", Linear, -3.0, 3.0),
        ),
        GraphSpec::new(cycle_number(), Axis::new("Voltage", "V", Linear, -3.0, 3.0)),
    ]
}

fn magnetic_graphs() -> Vec<GraphSpec> {
    let fields = [
        Axis::new("Magnetic field", "T", Linear, 0.0, 1.5),
        Axis::new("Magnetic field strength (H)", "A/m", Linear, 0.0, 1200.0),
        Axis::new("Temperature", "K", Linear, 0.0, 400.0),
    ];
    let magnetizations = [
        Axis::new("Magnetization", "T", Linear, -1.0, 1.0),
        Axis::new("magnetization_per_volume", "A/m", Linear, -1000.0, 1000.0),
        Axis::new("magnetization_per_weight", "emu/g", Linear, -10.0, 10.0),
    ];

    fields
        .iter()
        .flat_map(|x_axis| {
            magnetizations
                .iter()
                .map(move |y_axis| GraphSpec::new(x_axis.clone(), y_axis.clone()))
        })
        .collect()
}
