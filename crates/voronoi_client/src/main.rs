mod config;
mod error;
mod fetch;
mod query;
mod summary;

use crate::config::Config;
use crate::error::ClientError;
use crate::fetch::Fetcher;
use crate::query::VoronoiQuery;
use crate::summary::Summary;
use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use voronoi_wire::Data;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the summary only.
    let builder = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::info!(config = ?config, "Voronoi client starting");

    let mut data = load(&config).context("could not obtain a voronoi payload")?;
    if config.area_scale != 1.0 {
        data = data.scale_areas(config.area_scale);
    }
    tracing::info!(
        num_bins_x = data.num_bins_x,
        num_bins_y = data.num_bins_y,
        entries = data.entries.len(),
        "Decoded payload"
    );

    print!("{}", Summary::new(&data));
    Ok(())
}

/// Obtain one payload, either from a saved file or from the server.
fn load(config: &Config) -> Result<Data, ClientError> {
    if let Some(path) = &config.input {
        tracing::info!(path = %path.display(), "Decoding saved response");
        return voronoi_wire::read_file(path).map_err(|source| ClientError::Input {
            path: path.clone(),
            source,
        });
    }

    let fetcher = Fetcher::new(Duration::from_secs(config.timeout_secs));
    let body = match &config.url {
        Some(url) => fetcher.get(url, &[])?,
        None => {
            config.query.validate()?;
            fetcher.get(&VoronoiQuery::endpoint(&config.server), &config.query.params())?
        }
    };

    if let Some(path) = &config.save {
        std::fs::write(path, &body).map_err(|source| ClientError::Save {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = body.len(), "Saved response body");
    }

    Ok(Data::from_bytes(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::{ok_response, serve_once};
    use voronoi_wire::{encode_data, Entry, Point};

    fn payload() -> Data {
        Data {
            num_bins_x: 2,
            num_bins_y: 2,
            contact_map: vec![1, 2, 3, 4],
            entries: vec![Entry {
                area: 3.5,
                is_polygon_clipped: false,
                data_point: Point::new(1.0, 1.0),
                centroid: Point::new(1.0, 1.0),
                points: vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 2.0)],
            }],
        }
    }

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["voronoi_client"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn fetches_and_decodes_from_server() {
        let bytes = encode_data(&payload()).unwrap();
        let (server, head) = serve_once(ok_response(&bytes));

        let data = load(&config(&["--server", &server])).unwrap();
        assert_eq!(data, payload());

        let head = head.recv().unwrap();
        assert!(head.starts_with("GET /voronoiandimage?"), "{}", head);
    }

    #[test]
    fn truncated_body_is_a_decode_error() {
        let bytes = encode_data(&payload()).unwrap();
        let (server, _) = serve_once(ok_response(&bytes[..bytes.len() - 1]));

        let err = load(&config(&["--server", &server])).unwrap_err();
        assert!(
            matches!(err, ClientError::Decode(ref e) if e.is_out_of_bounds()),
            "{:?}",
            err
        );
    }

    #[test]
    fn invalid_query_never_reaches_the_network() {
        let err = load(&config(&[
            "--server",
            "http://127.0.0.1:9",
            "--x-start",
            "10",
            "--x-end",
            "10",
        ]))
        .unwrap_err();

        assert!(matches!(err, ClientError::Query(_)), "{:?}", err);
    }

    #[test]
    fn saved_body_can_be_reloaded() {
        let path = std::env::temp_dir().join(format!(
            "voronoi_client_saved_body_{}.bin",
            std::process::id()
        ));
        let path_arg = path.to_string_lossy().into_owned();

        let bytes = encode_data(&payload()).unwrap();
        let (base, _) = serve_once(ok_response(&bytes));
        let url = format!("{}/voronoiandimage?numBins=2", base);

        let fetched = load(&config(&["--url", &url, "--save", &path_arg])).unwrap();
        let reloaded = load(&config(&["--input", &path_arg])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(fetched, payload());
        assert_eq!(reloaded, payload());
    }

    #[test]
    fn area_scale_defaults_to_identity() {
        assert_eq!(config(&[]).area_scale, 1.0);
        assert_eq!(config(&["--area-scale", "2.5"]).area_scale, 2.5);
    }

    #[test]
    fn input_conflicts_with_url() {
        let result = Config::try_parse_from([
            "voronoi_client",
            "--input",
            "a.bin",
            "--url",
            "http://localhost:5002/voronoiandimage",
        ]);
        assert!(result.is_err());
    }
}
