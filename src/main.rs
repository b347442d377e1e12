use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_t, values_t, App,
    AppSettings, Arg, ArgMatches, SubCommand,
};
use itertools::Itertools;
use std::{error::Error, time::Duration};
use treesample::{
    data::read_graph,
    dataset::{q_error, Dataset},
    executor::EstimatorConfig,
    pattern::read_query,
    planner::{CandidateSpace, Dag},
    task::Task,
};

fn handle_info(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    println!("{}", read_graph(value_t!(matches, "GRAPH", String)?)?.info());
    Ok(())
}

fn handle_plan(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let data_graph = read_graph(value_t!(matches, "DATAGRAPH", String)?)?;
    let query_graph = read_query(value_t!(matches, "QUERY", String)?, &data_graph)?;
    let dag = Dag::build(&data_graph, &query_graph)?;
    let candidate_space = CandidateSpace::build(
        &data_graph,
        &query_graph,
        &dag,
        value_t!(matches, "refine", usize)?,
    );
    print!("{}", dag);
    println!(
        "candidates: [{}]",
        dag.order()
            .iter()
            .map(|&u| format!("u{}: {}", u, candidate_space.candidate_set_size(u)))
            .join(", ")
    );
    Ok(())
}

fn handle_estimate(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let data_graph = read_graph(value_t!(matches, "DATAGRAPH", String)?)?;
    let task = Task::new(&data_graph, parse_config(matches)?)?;
    for query in values_t!(matches, "QUERY", String)? {
        let report = task.run(&read_query(&query, &data_graph)?)?;
        println!("query: {}\n{}", query, report);
    }
    Ok(())
}

fn handle_dataset(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let dataset = Dataset::new(
        value_t!(matches, "ROOT", String)?,
        &value_t!(matches, "NAME", String)?,
    );
    let data_graph = read_graph(dataset.data_graph())?;
    let task = Task::new(&data_graph, parse_config(matches)?)?;
    let answers = dataset.read_answers()?;
    let mut q_errors = Vec::with_capacity(answers.len());
    for answer in answers {
        let query_graph = read_query(dataset.query_path(&answer.query), &data_graph)?;
        let report = task.run(&query_graph)?;
        let q = q_error(report.estimate, answer.count);
        println!(
            "{} estimate: {} truth: {} q_error: {} time: {}",
            answer.query,
            report.estimate,
            answer.count,
            q,
            (report.preprocess_time + report.sample_time).as_millis()
        );
        q_errors.push(q);
    }
    if !q_errors.is_empty() {
        println!(
            "mean_q_error: {}",
            q_errors.iter().sum::<f64>() / q_errors.len() as f64
        );
    }
    Ok(())
}

fn parse_config(matches: &ArgMatches) -> Result<EstimatorConfig, Box<dyn Error>> {
    if matches.is_present("threads") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(value_t!(matches, "threads", usize)?)
            .build_global()?;
    }
    let time_limit = if matches.is_present("time-limit") {
        Some(Duration::from_millis(value_t!(matches, "time-limit", u64)?))
    } else {
        None
    };
    Ok(EstimatorConfig::default()
        .with_num_samples(value_t!(matches, "samples", usize)?)
        .with_seed(value_t!(matches, "seed", u64)?)
        .with_refinement_rounds(value_t!(matches, "refine", usize)?)
        .with_time_limit(time_limit))
}

fn refine_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("refine")
        .help("Rounds of candidate refinement")
        .long("refine")
        .takes_value(true)
        .default_value("1")
}

fn estimator_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("samples")
            .help("Number of sampling trials per query")
            .long("samples")
            .short("n")
            .takes_value(true)
            .default_value("1000000"),
        Arg::with_name("seed")
            .help("Seed of the random number generators")
            .long("seed")
            .takes_value(true)
            .default_value("0"),
        refine_arg(),
        Arg::with_name("time-limit")
            .help("Stops sampling after this many milliseconds")
            .long("time-limit")
            .takes_value(true),
        Arg::with_name("threads")
            .help("Number of sampling threads")
            .long("threads")
            .short("t")
            .takes_value(true),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("info")
                .about("Displays information about the graph")
                .arg(Arg::with_name("GRAPH").required(true)),
        )
        .subcommand(
            SubCommand::with_name("plan")
                .about("Displays the traversal DAG and the candidate set sizes of the query")
                .arg(Arg::with_name("DATAGRAPH").required(true))
                .arg(Arg::with_name("QUERY").required(true))
                .arg(refine_arg()),
        )
        .subcommand(
            SubCommand::with_name("estimate")
                .about("Estimates the number of embeddings of the queries in the data graph")
                .arg(Arg::with_name("DATAGRAPH").required(true))
                .arg(Arg::with_name("QUERY").required(true).multiple(true))
                .args(&estimator_args()),
        )
        .subcommand(
            SubCommand::with_name("dataset")
                .about("Estimates every query of a dataset and compares with the true counts")
                .after_help(
                    r"The dataset directory must be laid out as:

  ROOT/NAME/data_graph/NAME.graph
  ROOT/NAME/query_graph/<query files>
  ROOT/NAME/NAME_ans.txt      (lines of `<query file> <time> <count>`)
",
                )
                .arg(Arg::with_name("ROOT").required(true))
                .arg(Arg::with_name("NAME").required(true))
                .args(&estimator_args()),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("info") {
        handle_info(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("plan") {
        handle_plan(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("estimate") {
        handle_estimate(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("dataset") {
        handle_dataset(matches)?;
    }
    Ok(())
}
