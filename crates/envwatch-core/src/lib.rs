//! envwatch core: geospatial matching and multi-source reconciliation for
//! per-location environmental hazard reports.

pub mod assembler;
pub mod error;
pub mod models;
pub mod nearest;
pub mod outage;
pub mod polygon;
pub mod prompt;
pub mod sources;
pub mod spatial;
pub mod stations;
pub mod summary;

pub use assembler::{ReportAssembler, Sources, DEFAULT_FETCH_TIMEOUT};
pub use error::{CoreError, SourceError};
pub use models::{
    AirQuality, AqiCategory, AqiForecast, Coordinate, EnvironmentalReport, FloodRisk,
    GaugeReading, OutageArea, OutageMetadata, PolygonRing, Station, WeatherObservation,
    WeatherReport,
};
pub use nearest::{find_nearest_station, NearestStation};
pub use outage::{any_area_contains, parse_outage_feed};
pub use polygon::{normalize_ring, normalize_vertices, text_value};
pub use prompt::{compose_prompt, AssistantMode};
pub use sources::{
    AirQualitySource, FloodGaugeSource, OutageSource, ReadingWindow, Summarizer, WeatherSource,
};
pub use spatial::{great_circle_distance, haversine_distance, point_in_polygon, DistanceUnit};
pub use stations::{MergedCatalog, StationCatalog};
