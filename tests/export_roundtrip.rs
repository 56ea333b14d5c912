#[cfg(test)]
mod export_roundtrip {
    use std::fs::{self, File};
    use std::io::{BufReader, Write};

    use swingsim::algorithm::Algorithm;
    use swingsim::config_loader::load_config;
    use swingsim::export::{parse_benchmark_csv, CSV_HEADER};
    use swingsim::orchestrator::{run_benchmark, run_from_config};
    use swingsim::topology::TorusTopology;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_csv_reproduces_statistics() {
        let dir = TempDir::new().unwrap();
        let yaml = format!(
            "topology:\n  dimensions: [4, 4]\nrun:\n  vector_sizes: [32, \"8KiB\", \"1MiB\"]\noutput:\n  directory: {}\n",
            dir.path().display()
        );
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        let (report, written) = run_from_config(&config).unwrap();

        let records =
            parse_benchmark_csv(BufReader::new(File::open(&written.csv).unwrap())).unwrap();
        assert_eq!(records.len(), 3 * 6);

        let expected = report
            .comparisons
            .iter()
            .flat_map(|c| c.results.iter().map(move |r| (c.vector_size_bytes, r)));
        for (record, (size, result)) in records.iter().zip(expected) {
            assert_eq!(record.vector_size_bytes, size);
            assert_eq!(record.algorithm, result.algorithm);
            assert_eq!(record.steps, result.statistics.num_steps);
            assert_eq!(record.time_us, result.statistics.estimated_time_us);
            assert_eq!(record.goodput_gbps, result.statistics.goodput_gbps);
            assert_eq!(record.total_bytes, result.statistics.total_bytes_sent);
        }
    }

    #[test]
    fn test_default_output_files() {
        let dir = TempDir::new().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "topology:\n  dimensions: [8, 8]\nrun:\n  vector_sizes: [\"8KiB\"]\n  algorithms: [swing-bw]\noutput:\n  directory: {}\n",
            dir.path().display()
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        run_from_config(&config).unwrap();

        let csv = fs::read_to_string(dir.path().join("benchmark_results.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("8192,Swing (Bandwidth-Optimal),12,"));
        // 64 ranks x 2 x (4096 + ... + 128)
        assert!(lines[1].ends_with(",1032192"));

        let dot = fs::read_to_string(dir.path().join("torus_topology.dot")).unwrap();
        assert_eq!(dot.lines().filter(|l| l.contains(" -- ")).count(), 128);
        assert!(dot.contains("  63 [pos=\"7,7!\", label=\"63\"];"));
    }

    #[test]
    fn test_benchmark_is_deterministic() {
        let torus = TorusTopology::from_dimensions(&[4, 4, 4]).unwrap();
        let sizes = [32u64, 4096, 1 << 20];
        let first = run_benchmark(&torus, &Algorithm::all(), &sizes);
        let second = run_benchmark(&torus, &Algorithm::all(), &sizes);
        assert_eq!(first, second);
    }
}
