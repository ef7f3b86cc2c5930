use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn build_wad(textures: usize) -> goldsrc_wad::Wad {
    let palette = goldsrc_types::Palette::from_fn(|i| goldsrc_types::Rgb::new(i as u8, 0, 0));
    let pixels: Vec<u8> = (0..256 * 256).map(|i| (i % 256) as u8).collect();

    let mut wad = goldsrc_wad::Wad::new();
    for i in 0..textures {
        let mut texture =
            goldsrc_wad::MipTexture::new(&format!("tex{i}"), 256, 256, palette.clone()).unwrap();
        texture.set_data(&pixels).unwrap();
        wad.add_texture(texture).unwrap();
    }
    wad
}

pub mod read {
    use divan::Bencher;
    use goldsrc_wad::Wad;
    use std::io::Cursor;

    #[divan::bench(args = [1, 16, 64])]
    fn open(bencher: Bencher, textures: usize) {
        let mut data = Cursor::new(Vec::new());
        super::build_wad(textures).write(&mut data).unwrap();

        bencher
            .with_inputs(|| Cursor::new(data.get_ref().clone()))
            .bench_refs(|input| {
                divan::black_box(Wad::read(input).unwrap());
            });
    }
}

pub mod write {
    use divan::Bencher;
    use std::io::Cursor;

    #[divan::bench(args = [1, 16, 64])]
    fn write(bencher: Bencher, textures: usize) {
        let wad = super::build_wad(textures);

        bencher.bench_local(|| {
            let mut output = Cursor::new(Vec::new());
            divan::black_box(wad.write(&mut output).unwrap());
        });
    }

    #[divan::bench]
    fn set_data(bencher: Bencher) {
        let pixels: Vec<u8> = (0..512 * 512).map(|i| (i % 256) as u8).collect();

        bencher.bench_local(|| {
            let mut texture = goldsrc_wad::MipTexture::new(
                "bench",
                512,
                512,
                goldsrc_types::Palette::default(),
            )
            .unwrap();
            texture.set_data(&pixels).unwrap();
            divan::black_box(texture);
        });
    }
}
