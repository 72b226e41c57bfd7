#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use biomass_flows::config::DatasetConfig;
use tempfile::TempDir;

pub const HEADER: &str =
    "latitude,longitude,resource_amount,resource,county_name,bt23_scenario,resource_price,fips";

/// Data directory holding the four default CSVs with small, known amounts.
///
/// Totals: Forest Processing Waste 60, Logging Residues 150,
/// Other Forest Waste 5, Small-Diameter Trees 10 (grand total 225).
pub struct Fixture {
    _tmp: TempDir,
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data_dir = tmp.path().join("data");
        let out_dir = tmp.path().join("out");
        fs::create_dir_all(&data_dir).expect("create data dir");
        fs::create_dir_all(&out_dir).expect("create out dir");

        let fixture = Self {
            _tmp: tmp,
            data_dir,
            out_dir,
        };
        fixture.write_default_files();
        fixture
    }

    fn write_default_files(&self) {
        let cfg = self.datasets();
        let rows: [&[&str]; 4] = [
            &[
                "38.50,-121.40,10,sawmill residues,Sacramento,mature-market medium,40.00,6067",
                "39.10,-120.90,30,sawmill residues,Placer,mature-market medium,40.00,6061",
                "40.60,-122.30,20,bark,Shasta,mature-market medium,42.50,6089",
            ],
            &[
                "41.00,-123.00,100,softwood residues,Humboldt,mature-market high,55.00,6023",
                "37.80,-119.50,50,hardwood residues,Tuolumne,mature-market high,,6109",
            ],
            &["36.70,-118.90,5,urban wood,Fresno,near-term,30.25,6019"],
            &[
                "39.70,-121.60,1,small trees,Butte,near-term,60.00,6007",
                "39.80,-121.70,2,small trees,Butte,near-term,60.00,6007",
                "39.90,-121.80,3,small trees,Tehama,near-term,60.00,6103",
                "40.00,-121.90,4,small trees,Tehama,near-term,60.00,6103",
            ],
        ];
        for (source, lines) in cfg.sources.iter().zip(rows) {
            self.write_csv(&source.file, HEADER, lines);
        }
    }

    pub fn write_csv(&self, file: impl AsRef<Path>, header: &str, lines: &[&str]) {
        let mut body = String::from(header);
        body.push('\n');
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        fs::write(self.data_dir.join(file), body).expect("write csv");
    }

    pub fn datasets(&self) -> DatasetConfig {
        DatasetConfig::california_default(&self.data_dir)
    }

    pub fn out(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("biomass-flows");
        cmd.env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }
}
