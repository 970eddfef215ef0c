// Declarative chart specs in Plotly's traces + layout shape. The client
// hands these straight to Plotly.newPlot without interpreting them.

use serde::Serialize;

/// Primary series colour, shared across every chart.
pub const ACCENT: &str = "#4f46e5";
/// Complement colour for the non-survivor pie slice.
pub const COMPLEMENT: &str = "#e5e7eb";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
        marker: SliceMarker,
        textposition: String,
        textinfo: String,
    },
    Bar {
        x: Vec<String>,
        y: Vec<f64>,
        marker: Marker,
    },
    Histogram {
        x: Vec<f64>,
        nbinsx: u32,
        marker: Marker,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Title {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Axis {
    fn new(title: &str) -> Self {
        Self {
            title: Title::new(title),
        }
    }
}

impl ChartSpec {
    pub fn pie(title: &str, labels: &[&str], values: Vec<u64>, colors: &[&str]) -> Self {
        Self {
            data: vec![Trace::Pie {
                labels: labels.iter().map(|l| l.to_string()).collect(),
                values,
                marker: SliceMarker {
                    colors: colors.iter().map(|c| c.to_string()).collect(),
                },
                textposition: "inside".to_string(),
                textinfo: "percent+label".to_string(),
            }],
            layout: Layout {
                title: Title::new(title),
                xaxis: None,
                yaxis: None,
            },
        }
    }

    pub fn bar(title: &str, x_title: &str, y_title: &str, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            data: vec![Trace::Bar {
                x,
                y,
                marker: Marker {
                    color: ACCENT.to_string(),
                },
            }],
            layout: Layout {
                title: Title::new(title),
                xaxis: Some(Axis::new(x_title)),
                yaxis: Some(Axis::new(y_title)),
            },
        }
    }

    pub fn histogram(title: &str, x_title: &str, x: Vec<f64>, nbinsx: u32) -> Self {
        Self {
            data: vec![Trace::Histogram {
                x,
                nbinsx,
                marker: Marker {
                    color: ACCENT.to_string(),
                },
            }],
            layout: Layout {
                title: Title::new(title),
                xaxis: Some(Axis::new(x_title)),
                yaxis: Some(Axis::new("Count")),
            },
        }
    }
}
