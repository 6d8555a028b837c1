use clap::{arg,crate_version,Command};
use huffpack::container;
use huffpack::tools::{bits,frequency::FrequencyTable,tree::HuffmanTree};
use huffpack::BitOrder;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

fn ok_to_overwrite(path_out: &str) -> bool {
    if let Ok(_f) = std::fs::File::open(path_out) {
        let mut ans = String::new();
        eprint!("{} exists, overwrite? (y/n) ",path_out);
        std::io::stdin().read_line(&mut ans).expect("could not read stdin");
        return ans.trim_end()=="y" || ans.trim_end()=="Y";
    }
    true
}

fn main() -> STDRESULT
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Compress:      `huffpack compress -i my_expanded -o my_compressed`
Expand:        `huffpack expand -i my_compressed -o my_expanded`
Show codes:    `huffpack codes -i my_expanded`";

    let orders = ["msb0","lsb0"];

    let mut main_cmd = Command::new("huffpack")
        .about("Compress and expand with static Huffman codes")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .arg(arg!(--order <ORDER> "bit order of the payload").value_parser(orders)
            .required(false).default_value("msb0"))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("expand a file"));

    main_cmd = main_cmd.subcommand(Command::new("codes")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .about("print the symbol counts and codes of a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let mut opt = container::STD_OPTIONS;
        opt.ord = match cmd.get_one::<String>("order").expect(RCH).as_str() {
            "lsb0" => BitOrder::Lsb0,
            _ => BitOrder::Msb0
        };
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        // nothing is written unless the whole buffer compresses
        let expanded = std::fs::read(path_in)?;
        let compressed = container::compress_slice(&expanded,&opt)?;
        std::fs::write(path_out,&compressed)?;
        eprintln!("compressed {} into {}",expanded.len(),compressed.len());
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let compressed = std::fs::read(path_in)?;
        let expanded = container::expand_slice(&compressed,&container::STD_OPTIONS)?;
        std::fs::write(path_out,&expanded)?;
        eprintln!("expanded {} into {}",compressed.len(),expanded.len());
    }

    if let Some(cmd) = matches.subcommand_matches("codes") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let freq = FrequencyTable::count(&dat);
        let tree = HuffmanTree::build(&freq)?;
        for (symbol,code) in tree.code_table().iter() {
            println!("{:02x} {} {}",symbol,freq.get(symbol),bits::to_string(code));
        }
        eprintln!("{} symbols, {} bits of payload",freq.len(),tree.weighted_path_length());
    }

    Ok(())
}
