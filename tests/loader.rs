mod common;

use approx::assert_relative_eq;
use biomass_flows::model::ResourceModel;
use biomass_flows::schema::point;
use biomass_flows::BiomassError;
use common::{Fixture, HEADER};

#[test]
fn loads_and_tags_every_dataset() {
    let fx = Fixture::new();
    let model = ResourceModel::load(&fx.datasets()).unwrap();

    assert_eq!(model.record_count(), 10);
    assert_eq!(model.frame().height(), 10);
    assert!(model.frame().column(point::RESOURCE_CATEGORY).is_ok());
    // extra columns are dropped at load
    assert!(model.frame().column("fips").is_err());

    let first = &model.points()[0];
    assert_eq!(first.category, "Forest Processing Waste");
    assert_eq!(first.county, "Sacramento");
    assert_eq!(first.price, Some(40.0));

    let last = model.points().last().unwrap();
    assert_eq!(last.category, "Small-Diameter Trees");
    assert_relative_eq!(last.amount, 4.0);
}

#[test]
fn totals_per_category_in_load_order() {
    let fx = Fixture::new();
    let model = ResourceModel::load(&fx.datasets()).unwrap();
    let totals = model.category_totals().unwrap();

    let labels: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Forest Processing Waste",
            "Logging Residues",
            "Other Forest Waste",
            "Small-Diameter Trees"
        ]
    );
    let sums: Vec<f64> = totals.iter().map(|t| t.sum).collect();
    assert_eq!(sums, vec![60.0, 150.0, 5.0, 10.0]);
    assert_relative_eq!(totals[0].mean.unwrap(), 20.0);
    assert_relative_eq!(totals[3].mean.unwrap(), 2.5);
    assert_eq!(totals[3].count, 4);
}

#[test]
fn blank_price_is_none() {
    let fx = Fixture::new();
    let model = ResourceModel::load(&fx.datasets()).unwrap();
    let hardwood = model
        .points()
        .iter()
        .find(|p| p.resource == "hardwood residues")
        .unwrap();
    assert_eq!(hardwood.price, None);
}

#[test]
fn center_is_mean_coordinate() {
    let fx = Fixture::new();
    let model = ResourceModel::load(&fx.datasets()).unwrap();
    let [lat, lon] = model.center().unwrap();
    let n = model.record_count() as f64;
    let expected_lat: f64 = model.points().iter().map(|p| p.latitude).sum::<f64>() / n;
    let expected_lon: f64 = model.points().iter().map(|p| p.longitude).sum::<f64>() / n;
    assert_relative_eq!(lat, expected_lat, epsilon = 1e-12);
    assert_relative_eq!(lon, expected_lon, epsilon = 1e-12);
}

#[test]
fn padded_header_names_are_trimmed() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[2].file,
        "latitude, longitude ,resource_amount,resource,county_name,bt23_scenario, resource_price",
        &["36.7,-118.9, 7 ,urban wood,Fresno,near-term,30"],
    );
    let totals = ResourceModel::load(&cfg).unwrap().category_totals().unwrap();
    assert_eq!(totals[2].sum, 7.0);
}

#[test]
fn empty_dataset_yields_zero_total() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(&cfg.sources[2].file, HEADER, &[]);
    let totals = ResourceModel::load(&cfg).unwrap().category_totals().unwrap();
    assert_eq!(totals[2].sum, 0.0);
    assert_eq!(totals[2].count, 0);
    assert_eq!(totals[2].mean, None);
}

#[test]
fn missing_file_names_the_category() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    std::fs::remove_file(cfg.path_of(&cfg.sources[1])).unwrap();

    let err = ResourceModel::load(&cfg).err().unwrap();
    match &err {
        BiomassError::Load { category, .. } => assert_eq!(category, "Logging Residues"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("Logging Residues"));
}

#[test]
fn missing_column_is_fatal() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[0].file,
        "latitude,longitude,resource_amount,resource,county_name,resource_price",
        &["38.5,-121.4,10,sawmill residues,Sacramento,40"],
    );
    let err = ResourceModel::load(&cfg).err().unwrap();
    match err {
        BiomassError::Load { source, .. } => {
            assert!(matches!(*source, BiomassError::MissingColumn(ref c) if c == point::SCENARIO))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_amount_is_fatal() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &["39.7,-121.6,lots,small trees,Butte,near-term,60,6007"],
    );
    let err = ResourceModel::load(&cfg).err().unwrap();
    assert!(err.to_string().contains("resource_amount"), "{err}");
}

#[test]
fn garbage_price_is_fatal() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &["39.7,-121.6,1,small trees,Butte,near-term,cheap,6007"],
    );
    let err = ResourceModel::load(&cfg).err().unwrap();
    assert!(err.to_string().contains("resource_price"), "{err}");
}

#[test]
fn negative_amount_is_fatal() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &["39.7,-121.6,-1,small trees,Butte,near-term,60,6007"],
    );
    assert!(ResourceModel::load(&cfg).is_err());
}

fn invalid_data_column(err: BiomassError) -> String {
    match err {
        BiomassError::Load { source, .. } => match *source {
            BiomassError::InvalidData(msg) => msg,
            other => panic!("unexpected cause: {other}"),
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nan_latitude_is_fatal() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &[
            "39.7,-121.6,1,small trees,Butte,near-term,60,6007",
            "nan,-121.6,1,small trees,Butte,near-term,60,6007",
        ],
    );
    let msg = invalid_data_column(ResourceModel::load(&cfg).err().unwrap());
    assert!(msg.contains(point::LATITUDE), "{msg}");
}

#[test]
fn infinite_coordinate_or_price_is_fatal() {
    let fx = Fixture::new();
    let cfg = fx.datasets();

    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &["39.7,inf,1,small trees,Butte,near-term,60,6007"],
    );
    let msg = invalid_data_column(ResourceModel::load(&cfg).err().unwrap());
    assert!(msg.contains(point::LONGITUDE), "{msg}");

    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &["39.7,-121.6,1,small trees,Butte,near-term,inf,6007"],
    );
    let msg = invalid_data_column(ResourceModel::load(&cfg).err().unwrap());
    assert!(msg.contains(point::RESOURCE_PRICE), "{msg}");
}

#[test]
fn whitespace_price_counts_as_blank() {
    let fx = Fixture::new();
    let cfg = fx.datasets();
    fx.write_csv(
        &cfg.sources[3].file,
        HEADER,
        &["39.7,-121.6,1,small trees,Butte,near-term,   ,6007"],
    );
    let model = ResourceModel::load(&cfg).unwrap();
    let tree = model
        .points()
        .iter()
        .find(|p| p.category == "Small-Diameter Trees")
        .unwrap();
    assert_eq!(tree.price, None);
}
