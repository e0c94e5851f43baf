use committed_integer_proofs::{
    commitments::pedersen::PedersenCommitment,
    parameters::Parameters,
    protocols::range::{CRSRange, Protocol, Statement, Witness},
    utils::Bls12G1,
};
use criterion::{criterion_group, criterion_main, Criterion};
use rug::rand::RandState;
use rug::Integer;

pub fn criterion_benchmark(c: &mut Criterion) {
    let params = Parameters::from_group::<Bls12G1>().unwrap();
    let mut rng = RandState::new();
    rng.seed(&Integer::from(13));

    let crs = CRSRange {
        parameters: params,
        commitment_key: PedersenCommitment::<Bls12G1>::setup(1),
    };
    let protocol = Protocol::from_crs(&crs).unwrap();

    let value = Integer::from(Integer::u_pow_u(2, 1000));
    let randomness = Integer::from(5);
    let commitment = protocol
        .crs
        .commitment_key
        .commit_value(&value, &randomness)
        .unwrap();
    let bound = Integer::from(Integer::u_pow_u(2, 2048));
    let statement = Statement {
        commitment,
        lower: -bound.clone(),
        upper: bound,
    };
    let witness = Witness { value, randomness };
    let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
    assert!(protocol.verify(&statement, &proof).unwrap());

    c.bench_function("range prove", |b| {
        b.iter(|| protocol.prove(&mut rng, &statement, &witness).unwrap())
    });
    c.bench_function("range verify", |b| {
        b.iter(|| protocol.verify(&statement, &proof).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
