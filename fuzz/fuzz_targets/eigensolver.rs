//! Submodule for fuzzing the power-iteration eigensolver directly on
//! arbitrary packed symmetric matrices.
use honggfuzz::fuzz;
use spectral_modularity::matrix::PackedSymmetricMatrix;
use spectral_modularity::prelude::EigenMethod;

fn main() {
    loop {
        fuzz!(|bg: PackedSymmetricMatrix| {
            for method in [EigenMethod::Power, EigenMethod::FullEvd] {
                if let Ok((lambda, v)) = spectral_modularity::eigen::leading_eigenpair(&bg, method) {
                    assert!(lambda.is_finite());
                    assert_eq!(v.len(), bg.order());
                    assert!(v.iter().all(|x| x.is_finite()));
                }
            }
        });
    }
}
