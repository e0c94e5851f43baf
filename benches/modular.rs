use committed_integer_proofs::{
    commitments::pedersen::PedersenCommitment,
    parameters::Parameters,
    protocols::modular::{
        multiplication::{Protocol, Statement, Witness},
        CRSModular, ModulusRange,
    },
    utils::Bls12G1,
};
use criterion::{criterion_group, criterion_main, Criterion};
use rug::rand::RandState;
use rug::Integer;

pub fn criterion_benchmark(c: &mut Criterion) {
    let params = Parameters::from_group::<Bls12G1>().unwrap();
    let mut rng = RandState::new();
    rng.seed(&Integer::from(13));

    let crs = CRSModular {
        parameters: params,
        commitment_key: PedersenCommitment::<Bls12G1>::setup(1),
        bound_bits: 2050,
        modulus_range: ModulusRange::Prove,
    };
    let protocol = Protocol::from_crs(&crs).unwrap();
    let key = &protocol.crs.commitment_key;

    let modulus = Integer::from(Integer::u_pow_u(2, 2047)) + 1155u32;
    let a = Integer::from(Integer::u_pow_u(3, 1200)) % &modulus;
    let b = Integer::from(Integer::u_pow_u(5, 800)) % &modulus;
    let result = Integer::from(&a * &b) % &modulus;
    let (c_a, r_a) = key.commit_random(&[a.clone()], &mut rng).unwrap();
    let (c_b, r_b) = key.commit_random(&[b.clone()], &mut rng).unwrap();
    let (c_result, r_result) = key.commit_random(&[result.clone()], &mut rng).unwrap();
    let (c_modulus, r_modulus) = key.commit_random(&[modulus.clone()], &mut rng).unwrap();
    let statement = Statement {
        c_a,
        c_b,
        c_result,
        c_modulus,
    };
    let witness = Witness {
        a,
        r_a,
        b,
        r_b,
        result,
        r_result,
        modulus,
        r_modulus,
    };
    let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
    assert!(protocol.verify(&statement, &proof).unwrap());

    c.bench_function("modular multiplication prove", |bench| {
        bench.iter(|| protocol.prove(&mut rng, &statement, &witness).unwrap())
    });
    c.bench_function("modular multiplication verify", |bench| {
        bench.iter(|| protocol.verify(&statement, &proof).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
