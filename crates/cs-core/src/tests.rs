//! Unit tests for cs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ChunkIndex, Rank, Round};

    #[test]
    fn index_roundtrip() {
        let r = Rank(42);
        assert_eq!(r.index(), 42);
        assert_eq!(Rank::try_from(42usize).unwrap(), r);
    }

    #[test]
    fn ordering() {
        assert!(Rank(0) < Rank(1));
        assert!(ChunkIndex(9) > ChunkIndex(3));
    }

    #[test]
    fn display_prefixes() {
        assert_eq!(Rank(7).to_string(), "P7");
        assert_eq!(ChunkIndex(3).to_string(), "C3");
        assert_eq!(Round(0).to_string(), "R0");
    }

    #[test]
    fn chunk_owner_is_same_number() {
        assert_eq!(ChunkIndex(5).owner(), Rank(5));
        assert_eq!(Rank(2).own_chunk(), ChunkIndex(2));
    }
}

#[cfg(test)]
mod world {
    use crate::{CsError, Rank, VectorSize, WorldSize};

    #[test]
    fn rejects_non_positive() {
        assert!(matches!(WorldSize::new(0), Err(CsError::InvalidWorldSize(0))));
        assert!(matches!(WorldSize::new(-3), Err(CsError::InvalidWorldSize(-3))));
        assert!(WorldSize::new(1).is_ok());
    }

    #[test]
    fn rejects_oversized() {
        assert!(WorldSize::new(u32::MAX as i64 + 1).is_err());
    }

    #[test]
    fn wrap_is_mathematical_modulo() {
        let w = WorldSize::new(16).unwrap();
        assert_eq!(w.wrap(-1), Rank(15));
        assert_eq!(w.wrap(-17), Rank(15));
        assert_eq!(w.wrap(16), Rank(0));
        assert_eq!(w.wrap(35), Rank(3));
    }

    #[test]
    fn ring_neighbours() {
        let w = WorldSize::new(4).unwrap();
        assert_eq!(w.next(Rank(3)), Rank(0));
        assert_eq!(w.prev(Rank(0)), Rank(3));
        assert_eq!(w.next(Rank(1)), Rank(2));
    }

    #[test]
    fn single_process_neighbours_are_self() {
        let w = WorldSize::new(1).unwrap();
        assert_eq!(w.next(Rank(0)), Rank(0));
        assert_eq!(w.prev(Rank(0)), Rank(0));
    }

    #[test]
    fn ranks_iterates_in_order() {
        let w = WorldSize::new(3).unwrap();
        let ranks: Vec<Rank> = w.ranks().collect();
        assert_eq!(ranks, vec![Rank(0), Rank(1), Rank(2)]);
        assert!(w.contains(Rank(2)));
        assert!(!w.contains(Rank(3)));
    }

    #[test]
    fn vector_size_rejects_negative() {
        assert!(matches!(VectorSize::new(-1), Err(CsError::InvalidVectorSize(-1))));
        assert_eq!(VectorSize::new(0).unwrap().bytes(), 0);
    }

    #[test]
    fn per_chunk_floors() {
        let v = VectorSize::new(1000).unwrap();
        assert_eq!(v.per_chunk(WorldSize::new(3).unwrap()), 333);
        assert_eq!(v.per_chunk(WorldSize::new(1).unwrap()), 1000);
    }
}

#[cfg(test)]
mod kind {
    use crate::{Algorithm, CsError, Phase, Variant};

    #[test]
    fn variant_parse() {
        assert_eq!("bandwidth".parse::<Variant>().unwrap(), Variant::Bandwidth);
        assert_eq!(" latency ".parse::<Variant>().unwrap(), Variant::Latency);
        let err = "throughput".parse::<Variant>().unwrap_err();
        assert!(matches!(err, CsError::UnknownVariant(ref s) if s == "throughput"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn variant_labels() {
        assert_eq!(Variant::Bandwidth.to_string(), "bandwidth");
        assert_eq!(Variant::Latency.label(), "Latency-Optimal");
    }

    #[test]
    fn algorithm_parse() {
        assert_eq!("ring".parse::<Algorithm>().unwrap(), Algorithm::Ring);
        assert_eq!(
            "recursive_doubling".parse::<Algorithm>().unwrap(),
            Algorithm::RecursiveDoubling
        );
        assert!("bucket".parse::<Algorithm>().is_err());
        assert!(!Algorithm::Ring.needs_variant());
        assert!(Algorithm::Swing.needs_variant());
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::ReduceScatter.to_string(), "Reduce-Scatter");
        assert_eq!(Phase::ReduceScatter.as_str(), "reduce_scatter");
        assert_eq!(Phase::Allgather.as_str(), "allgather");
    }
}

#[cfg(test)]
mod config {
    use crate::{Algorithm, CsError, RunConfig, Variant};

    #[test]
    fn swing_requires_variant() {
        let err = RunConfig::new(8, 1024, Algorithm::Swing).validate().unwrap_err();
        assert!(matches!(err, CsError::MissingVariant(Algorithm::Swing)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn ring_ignores_variant() {
        let run = RunConfig::new(8, 1024, Algorithm::Ring)
            .with_variant("nonsense")
            .validate()
            .unwrap();
        assert_eq!(run.variant, None);
        assert_eq!(run.world.get(), 8);
    }

    #[test]
    fn validated_fields() {
        let run = RunConfig::new(16, 14_400, Algorithm::Swing)
            .with_variant("latency")
            .validate()
            .unwrap();
        assert_eq!(run.world.get(), 16);
        assert_eq!(run.vector.bytes(), 14_400);
        assert_eq!(run.variant, Some(Variant::Latency));
    }

    #[test]
    fn world_size_checked_first() {
        let err = RunConfig::new(0, -5, Algorithm::Swing)
            .with_variant("bogus")
            .validate()
            .unwrap_err();
        assert!(matches!(err, CsError::InvalidWorldSize(0)));
    }

    #[test]
    fn negative_vector_rejected() {
        let err = RunConfig::new(4, -5, Algorithm::Ring).validate().unwrap_err();
        assert!(matches!(err, CsError::InvalidVectorSize(-5)));
    }

    #[test]
    fn parse_and_io_errors_are_not_invalid_arguments() {
        assert!(!CsError::Parse("row 2: bad".into()).is_invalid_argument());
        assert!(!CsError::from(std::io::Error::other("gone")).is_invalid_argument());
        assert!(CsError::MissingVariant(Algorithm::Swing).is_invalid_argument());
    }
}

#[cfg(test)]
mod bytes {
    use crate::HumanBytes;

    #[test]
    fn scales_units() {
        assert_eq!(HumanBytes(0).to_string(), "0B");
        assert_eq!(HumanBytes(512).to_string(), "512B");
        assert_eq!(HumanBytes(2048).to_string(), "2KB");
        assert_eq!(HumanBytes(16_384).to_string(), "16KB");
        assert_eq!(HumanBytes(3 * 1024 * 1024).to_string(), "3MB");
        assert_eq!(HumanBytes(5 * 1024 * 1024 * 1024).to_string(), "5GB");
    }

    #[test]
    fn caps_at_gigabytes() {
        assert_eq!(HumanBytes(2048 * 1024 * 1024 * 1024).to_string(), "2048GB");
    }
}
