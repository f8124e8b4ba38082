use tracing::debug;

use crate::models::{Candidate, GUIDE_LEN, SITE_LEN};

/// Scan a normalized sequence for SpCas9 sites: a 20-base guide immediately
/// 5' of an NGG PAM. Candidates come back in ascending position order; the
/// scan stops once `max_candidates` sites have been collected. A sequence
/// shorter than 23 bases yields an empty list.
pub fn find_spcas9_sites(sequence: &str, max_candidates: usize) -> Vec<Candidate> {
    let bases = sequence.as_bytes();
    let mut hits = Vec::new();

    if bases.len() < SITE_LEN {
        return hits;
    }

    for position in 0..=bases.len() - SITE_LEN {
        if hits.len() >= max_candidates {
            debug!("scan cap of {} candidates reached", max_candidates);
            break;
        }

        // NGG: any base, then two guanines.
        let pam = &bases[position + GUIDE_LEN..position + SITE_LEN];
        if pam[1] == b'G' && pam[2] == b'G' {
            hits.push(Candidate {
                position,
                guide: sequence[position..position + GUIDE_LEN].to_string(),
                pam: sequence[position + GUIDE_LEN..position + SITE_LEN].to_string(),
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PAM_LEN;

    const CAP: usize = 200;

    #[test]
    fn too_short_sequence_finds_nothing() {
        assert!(find_spcas9_sites("", CAP).is_empty());
        assert!(find_spcas9_sites("ATGC", CAP).is_empty());
        // 22 bases, one short of a full site
        assert!(find_spcas9_sites(&"A".repeat(22), CAP).is_empty());
    }

    #[test]
    fn minimal_site_is_found_at_position_zero() {
        // Exactly 23 bases: 20-base guide plus "AGG" PAM.
        let sequence = format!("{}AGG", "ATGCATGCATGCATGCATGC");
        assert_eq!(sequence.len(), 23);

        let hits = find_spcas9_sites(&sequence, CAP);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[0].guide, "ATGCATGCATGCATGCATGC");
        assert_eq!(hits[0].pam, "AGG");
    }

    #[test]
    fn trailing_trimer_not_ending_gg_is_rejected() {
        // 26 bases whose only candidate trimers end in GA/AT/TG/GC.
        let sequence = "ATGCGCGCGCGCGCGCGCGCGGATGC";
        assert_eq!(sequence.len(), 26);
        assert!(find_spcas9_sites(sequence, CAP).is_empty());
    }

    #[test]
    fn extraction_matches_hand_computed_triple() {
        // Site at position 2: guide = bases 2..22, PAM = bases 22..25 ("TGG").
        let sequence = format!("AA{}TGGCC", "CCCCCAAAAATTTTTGGGGG");
        let hits = find_spcas9_sites(&sequence, CAP);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 2);
        assert_eq!(hits[0].guide, "CCCCCAAAAATTTTTGGGGG");
        assert_eq!(hits[0].pam, "TGG");
    }

    #[test]
    fn every_hit_has_guide_20_and_pam_ending_gg() {
        let sequence = "ATGCCGGTTAAGGCGATCGGATTACAGGTTGGCCATGCAGGTACTGGATCCAAGGTTGCA";
        let hits = find_spcas9_sites(sequence, CAP);
        assert!(!hits.is_empty());

        for (i, hit) in hits.iter().enumerate() {
            assert_eq!(hit.guide.len(), GUIDE_LEN, "guide length at hit {}", i);
            assert_eq!(hit.pam.len(), PAM_LEN, "pam length at hit {}", i);
            assert!(hit.pam.ends_with("GG"), "pam {} does not end in GG", hit.pam);
        }

        // Ascending, strictly unique positions.
        for pair in hits.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }

    #[test]
    fn scan_cap_limits_emitted_candidates() {
        let sequence = "G".repeat(300);
        let capped = find_spcas9_sites(&sequence, 5);
        assert_eq!(capped.len(), 5);
        assert_eq!(capped[0].position, 0);
        assert_eq!(capped[4].position, 4);

        // Identical input scans identically.
        assert_eq!(capped, find_spcas9_sites(&sequence, 5));
    }
}
